//! Declarative policy expressions over permission codes

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Boolean rule attached to an operation
///
/// Expressions are plain data: they are built once when the binder table is
/// assembled and evaluated by [`authorize`](super::authorize) on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyExpression {
    /// The principal's effective permission set contains the code
    Require(String),
    /// At least one sub-expression holds (empty: never)
    Any(Vec<PolicyExpression>),
    /// Every sub-expression holds (empty: always)
    All(Vec<PolicyExpression>),
    /// The target object is owned by, or is, the principal
    Owner,
    /// The principal is a superuser
    Superuser,
    /// The principal is staff; used where an endpoint treats staff as admin
    Staff,
    /// Any active, authenticated principal
    Authenticated,
}

impl PolicyExpression {
    pub fn require(code: impl Into<String>) -> Self {
        Self::Require(code.into())
    }

    pub fn any(expressions: impl IntoIterator<Item = PolicyExpression>) -> Self {
        Self::Any(expressions.into_iter().collect())
    }

    pub fn all(expressions: impl IntoIterator<Item = PolicyExpression>) -> Self {
        Self::All(expressions.into_iter().collect())
    }

    /// Disjunction that flattens nested `Any` on the left
    pub fn or(self, other: PolicyExpression) -> Self {
        match self {
            Self::Any(mut expressions) => {
                expressions.push(other);
                Self::Any(expressions)
            }
            expression => Self::Any(vec![expression, other]),
        }
    }

    /// Conjunction that flattens nested `All` on the left
    pub fn and(self, other: PolicyExpression) -> Self {
        match self {
            Self::All(mut expressions) => {
                expressions.push(other);
                Self::All(expressions)
            }
            expression => Self::All(vec![expression, other]),
        }
    }

    /// Whether evaluating this expression may need a target object
    pub fn needs_target(&self) -> bool {
        match self {
            Self::Owner => true,
            Self::Any(expressions) | Self::All(expressions) => {
                expressions.iter().any(PolicyExpression::needs_target)
            }
            _ => false,
        }
    }

    /// Every permission code mentioned anywhere in the expression
    pub fn permission_codes(&self) -> BTreeSet<&str> {
        let mut codes = BTreeSet::new();
        self.collect_codes(&mut codes);
        codes
    }

    fn collect_codes<'a>(&'a self, codes: &mut BTreeSet<&'a str>) {
        match self {
            Self::Require(code) => {
                codes.insert(code.as_str());
            }
            Self::Any(expressions) | Self::All(expressions) => {
                for expression in expressions {
                    expression.collect_codes(codes);
                }
            }
            _ => {}
        }
    }
}

impl BitOr for PolicyExpression {
    type Output = PolicyExpression;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitAnd for PolicyExpression {
    type Output = PolicyExpression;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl fmt::Display for PolicyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Require(code) => write!(f, "require({})", code),
            Self::Any(expressions) => write_list(f, "any", expressions),
            Self::All(expressions) => write_list(f, "all", expressions),
            Self::Owner => f.write_str("owner"),
            Self::Superuser => f.write_str("superuser"),
            Self::Staff => f.write_str("staff"),
            Self::Authenticated => f.write_str("authenticated"),
        }
    }
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    expressions: &[PolicyExpression],
) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, expression) in expressions.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", expression)?;
    }
    f.write_str(")")
}
