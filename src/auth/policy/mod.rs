//! Permission evaluation core
//!
//! [`PolicyBinder`] says which [`PolicyExpression`] guards an [`Operation`],
//! [`authorize`] evaluates it against a [`Principal`] snapshot.

mod binder;
mod engine;
mod expression;
mod principal;

pub use binder::{Access, Action, Operation, PolicyBinder, Resource};
pub use engine::{
    authorize, Decision, DenyReason, NO_GRANTING_RULE, STAFF_CAPABILITY, SUPERUSER_CAPABILITY,
};
pub use expression::PolicyExpression;
pub use principal::{AccessTarget, Principal, TargetOwner};
