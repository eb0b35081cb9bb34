//! Operation to policy bindings
//!
//! The binder is the single table that says which rule guards which
//! operation. It is plain data and can be enumerated and tested without the
//! engine or the HTTP layer.

use super::expression::PolicyExpression;
use crate::auth::rbac::codes;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Resource an operation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Auth,
    User,
    Role,
    Permission,
    Branch,
    Department,
    Report,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Auth => "auth",
            Resource::User => "user",
            Resource::Role => "role",
            Resource::Permission => "permission",
            Resource::Branch => "branch",
            Resource::Department => "department",
            Resource::Report => "report",
        }
    }
}

/// Action performed on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
    ChangePassword,
    Login,
    Register,
    Refresh,
    Logout,
    Me,
    Stats,
    ByBranch,
    HighBalance,
    SearchCustomer,
    RecentAccounts,
    Export,
    Permissions,
    Health,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Retrieve => "retrieve",
            Action::Create => "create",
            Action::Update => "update",
            Action::PartialUpdate => "partial_update",
            Action::Destroy => "destroy",
            Action::ChangePassword => "change_password",
            Action::Login => "login",
            Action::Register => "register",
            Action::Refresh => "refresh",
            Action::Logout => "logout",
            Action::Me => "me",
            Action::Stats => "stats",
            Action::ByBranch => "by_branch",
            Action::HighBalance => "high_balance",
            Action::SearchCustomer => "search_customer",
            Action::RecentAccounts => "recent_accounts",
            Action::Export => "export",
            Action::Permissions => "permissions",
            Action::Health => "health",
        }
    }
}

/// A (resource, action) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operation {
    pub resource: Resource,
    pub action: Action,
}

impl Operation {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource.as_str(), self.action.as_str())
    }
}

/// Access rule bound to an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No session required
    AllowAny,
    /// A session is required and the expression must hold
    Policy(PolicyExpression),
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::AllowAny => f.write_str("allow_any"),
            Access::Policy(expression) => write!(f, "{}", expression),
        }
    }
}

/// Static mapping from operations to access rules
#[derive(Debug, Clone, Default)]
pub struct PolicyBinder {
    bindings: BTreeMap<Operation, Access>,
}

impl PolicyBinder {
    /// Binder with no bindings
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bind (or rebind) an operation
    pub fn bind(mut self, operation: Operation, access: Access) -> Self {
        self.bindings.insert(operation, access);
        self
    }

    fn bind_all(mut self, resource: Resource, actions: &[Action], access: Access) -> Self {
        for action in actions {
            self.bindings
                .insert(Operation::new(resource, *action), access.clone());
        }
        self
    }

    /// The bindings used by the HTTP surface
    pub fn standard() -> Self {
        use Action::*;
        use PolicyExpression::{Authenticated, Owner, Staff};

        let read = [List, Retrieve];
        let write = [Create, Update, PartialUpdate, Destroy];

        Self::empty()
            .bind_all(Resource::Auth, &[Login, Register, Refresh], Access::AllowAny)
            .bind_all(Resource::Auth, &[Logout, Me], Access::Policy(Authenticated))
            .bind(Operation::new(Resource::User, Create), Access::AllowAny)
            .bind_all(Resource::User, &read, staff_or(codes::USER_VIEW))
            .bind_all(Resource::User, &[Update, PartialUpdate], staff_or(codes::USER_CHANGE))
            .bind(Operation::new(Resource::User, Destroy), staff_or(codes::USER_DELETE))
            .bind(
                Operation::new(Resource::User, ChangePassword),
                Access::Policy(Owner | Staff),
            )
            .bind_all(Resource::Role, &read, staff_or(codes::ROLE_VIEW))
            .bind_all(Resource::Role, &write, staff_or(codes::ROLE_MANAGE))
            .bind_all(Resource::Permission, &read, staff_or(codes::PERMISSION_VIEW))
            .bind_all(Resource::Permission, &write, staff_or(codes::PERMISSION_MANAGE))
            .bind_all(Resource::Branch, &read, staff_or(codes::BRANCH_VIEW))
            .bind_all(Resource::Branch, &write, staff_or(codes::BRANCH_MANAGE))
            .bind_all(Resource::Department, &read, staff_or(codes::DEPARTMENT_VIEW))
            .bind_all(Resource::Department, &write, staff_or(codes::DEPARTMENT_MANAGE))
            .bind_all(
                Resource::Report,
                &read,
                Access::Policy(
                    PolicyExpression::require(codes::ACCOUNT_VIEW)
                        | PolicyExpression::require(codes::REPORTS_VIEW),
                ),
            )
            .bind_all(
                Resource::Report,
                &[Stats, ByBranch, HighBalance, SearchCustomer, RecentAccounts, Health],
                Access::Policy(PolicyExpression::require(codes::REPORTS_VIEW)),
            )
            .bind(
                Operation::new(Resource::Report, Export),
                Access::Policy(
                    PolicyExpression::require(codes::REPORTS_VIEW)
                        & PolicyExpression::require(codes::REPORTS_EXPORT),
                ),
            )
            .bind(
                Operation::new(Resource::Report, Permissions),
                Access::Policy(Authenticated),
            )
    }

    /// Access rule for an operation, `None` when unbound
    pub fn resolve(&self, operation: Operation) -> Option<&Access> {
        self.bindings.get(&operation)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Operation, &Access)> {
        self.bindings.iter()
    }

    /// Bound operations on one resource
    pub fn operations_for(&self, resource: Resource) -> Vec<Operation> {
        self.bindings
            .keys()
            .filter(|operation| operation.resource == resource)
            .copied()
            .collect()
    }

    /// Every permission code referenced by any binding
    pub fn referenced_permissions(&self) -> BTreeSet<String> {
        self.bindings
            .values()
            .filter_map(|access| match access {
                Access::Policy(expression) => Some(expression.permission_codes()),
                Access::AllowAny => None,
            })
            .flatten()
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn staff_or(code: &str) -> Access {
    Access::Policy(PolicyExpression::require(code) | PolicyExpression::Staff)
}
