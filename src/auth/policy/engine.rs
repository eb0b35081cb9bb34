//! Authorization engine
//!
//! A pure function over a principal snapshot, a policy expression and an
//! optional target object. It keeps no state and never blocks, so any number
//! of request handlers may call it concurrently.

use super::expression::PolicyExpression;
use super::principal::{AccessTarget, Principal};
use crate::utils::error::{GatewayError, Result};
use std::fmt;
use tracing::debug;

/// Capability name reported when a `Superuser` rule fails
pub const SUPERUSER_CAPABILITY: &str = "superuser";
/// Capability name reported when a `Staff` rule fails
pub const STAFF_CAPABILITY: &str = "staff";
/// Capability name reported when an empty `Any` is evaluated
pub const NO_GRANTING_RULE: &str = "*";

/// Why a request was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The account is deactivated
    Inactive,
    /// No valid session
    Unauthenticated,
    /// A required permission is absent from the effective set
    MissingPermission(String),
    /// The target belongs to someone else
    NotOwner,
    /// An object-level rule was evaluated without a target
    MissingTarget,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Inactive => f.write_str("account is inactive"),
            DenyReason::Unauthenticated => f.write_str("authentication required"),
            DenyReason::MissingPermission(code) => write!(f, "missing permission {}", code),
            DenyReason::NotOwner => f.write_str("not the owner of this object"),
            DenyReason::MissingTarget => f.write_str("object-level check without a target"),
        }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(reason),
        }
    }

    /// Turn a denial into a [`GatewayError::Denied`]
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(GatewayError::Denied(reason)),
        }
    }
}

/// Decide whether `principal` satisfies `policy` for `target`
///
/// Order: missing principal, inactive account, superuser bypass, then the
/// expression itself. A deactivated superuser is therefore denied.
pub fn authorize(
    principal: Option<&Principal>,
    policy: &PolicyExpression,
    target: Option<&dyn AccessTarget>,
) -> Decision {
    let Some(principal) = principal else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if !principal.active {
        return Decision::Deny(DenyReason::Inactive);
    }

    if principal.is_superuser {
        return Decision::Allow;
    }

    let decision = evaluate(principal, policy, target);
    debug!(principal = %principal.id, policy = %policy, ?decision, "policy evaluated");
    decision
}

fn evaluate(
    principal: &Principal,
    policy: &PolicyExpression,
    target: Option<&dyn AccessTarget>,
) -> Decision {
    match policy {
        PolicyExpression::Require(code) => {
            if principal.has_permission(code) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::MissingPermission(code.clone()))
            }
        }
        PolicyExpression::Any(expressions) => {
            // First denial is the most specific one for the caller
            let mut first_denial = None;
            for expression in expressions {
                match evaluate(principal, expression, target) {
                    Decision::Allow => return Decision::Allow,
                    Decision::Deny(reason) => {
                        first_denial.get_or_insert(reason);
                    }
                }
            }
            Decision::Deny(first_denial.unwrap_or_else(|| {
                DenyReason::MissingPermission(NO_GRANTING_RULE.to_string())
            }))
        }
        PolicyExpression::All(expressions) => {
            for expression in expressions {
                if let Decision::Deny(reason) = evaluate(principal, expression, target) {
                    return Decision::Deny(reason);
                }
            }
            Decision::Allow
        }
        PolicyExpression::Owner => match target {
            None => Decision::Deny(DenyReason::MissingTarget),
            Some(target) if target.target_owner().is_owned_by(principal.id) => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::NotOwner),
        },
        PolicyExpression::Superuser => {
            if principal.is_superuser {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::MissingPermission(
                    SUPERUSER_CAPABILITY.to_string(),
                ))
            }
        }
        PolicyExpression::Staff => {
            if principal.is_staff {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::MissingPermission(STAFF_CAPABILITY.to_string()))
            }
        }
        PolicyExpression::Authenticated => Decision::Allow,
    }
}
