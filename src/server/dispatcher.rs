//! Per-request authorization gate
//!
//! Resolves an operation's binding and runs the engine. Development mode is
//! decided here, once, and never reaches the engine.

use crate::auth::policy::{
    Access, AccessTarget, Decision, Operation, PolicyBinder, PolicyExpression, Principal,
    authorize,
};
use crate::utils::error::{GatewayError, Result};
use tracing::{debug, warn};

/// Operation dispatcher
#[derive(Debug, Clone)]
pub struct Dispatcher {
    binder: PolicyBinder,
    development_mode: bool,
}

impl Dispatcher {
    pub fn new(binder: PolicyBinder, development_mode: bool) -> Self {
        if development_mode {
            warn!("Authorization checks are disabled (development mode)");
        }
        Self {
            binder,
            development_mode,
        }
    }

    /// Dispatcher over the standard binding table
    pub fn standard(development_mode: bool) -> Self {
        Self::new(PolicyBinder::standard(), development_mode)
    }

    pub fn binder(&self) -> &PolicyBinder {
        &self.binder
    }

    pub fn development_mode(&self) -> bool {
        self.development_mode
    }

    /// Decision for one operation
    ///
    /// An operation with no binding is a wiring mistake and fails closed
    /// with an internal error.
    pub fn decide(
        &self,
        operation: Operation,
        principal: Option<&Principal>,
        target: Option<&dyn AccessTarget>,
    ) -> Result<Decision> {
        if self.development_mode {
            return Ok(Decision::Allow);
        }

        match self.binder.resolve(operation) {
            Some(Access::AllowAny) => Ok(Decision::Allow),
            Some(Access::Policy(policy)) => Ok(authorize(principal, policy, target)),
            None => Err(GatewayError::internal(format!(
                "No policy bound to {}",
                operation
            ))),
        }
    }

    /// Like [`decide`](Self::decide), with a denial turned into an error
    pub fn authorize(
        &self,
        operation: Operation,
        principal: Option<&Principal>,
        target: Option<&dyn AccessTarget>,
    ) -> Result<()> {
        let decision = self.decide(operation, principal, target)?;
        if let Some(reason) = decision.reason() {
            warn!(
                operation = %operation,
                principal = ?principal.map(|p| p.id),
                "Denied: {}",
                reason
            );
        } else {
            debug!(operation = %operation, "Allowed");
        }
        decision.into_result()
    }

    /// Check an extra rule inside an already authorized operation
    pub fn require(
        &self,
        principal: Option<&Principal>,
        policy: &PolicyExpression,
        target: Option<&dyn AccessTarget>,
    ) -> Result<()> {
        if self.development_mode {
            return Ok(());
        }
        authorize(principal, policy, target).into_result()
    }

    /// Whether the principal may perform a target-free operation
    pub fn permits(&self, operation: Operation, principal: Option<&Principal>) -> bool {
        self.decide(operation, principal, None)
            .is_ok_and(|decision| decision.is_allowed())
    }
}
