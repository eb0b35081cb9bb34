//! Assertions over authorization outcomes

use rbac_gateway::{Decision, DenyReason};

/// Assert that a decision is a denial with the given reason
#[track_caller]
pub fn assert_denied(decision: &Decision, expected: &DenyReason) {
    match decision {
        Decision::Deny(reason) => assert_eq!(reason, expected),
        Decision::Allow => panic!("expected Deny({:?}), got Allow", expected),
    }
}

/// Assert that a decision is `Allow`
#[track_caller]
pub fn assert_allowed(decision: &Decision) {
    assert!(decision.is_allowed(), "expected Allow, got {:?}", decision);
}
