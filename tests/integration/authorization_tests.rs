//! Authorization engine and binding table properties

use crate::common::PrincipalFactory;
use crate::common::assertions::{assert_allowed, assert_denied};
use rbac_gateway::auth::policy::TargetOwner;
use rbac_gateway::auth::rbac::codes;
use rbac_gateway::{
    Access, Action, DenyReason, Operation, PolicyBinder, PolicyExpression, Resource, authorize,
};
use uuid::Uuid;

fn standard_policies() -> Vec<(Operation, PolicyExpression)> {
    PolicyBinder::standard()
        .bindings()
        .filter_map(|(operation, access)| match access {
            Access::Policy(expression) => Some((*operation, expression.clone())),
            Access::AllowAny => None,
        })
        .collect()
}

#[test]
fn test_superuser_passes_every_bound_rule() {
    let superuser = PrincipalFactory::superuser();
    let target = TargetOwner::Identity(Uuid::new_v4());

    for (operation, policy) in standard_policies() {
        let decision = authorize(Some(&superuser), &policy, Some(&target));
        assert!(decision.is_allowed(), "{} denied to a superuser", operation);
    }
}

#[test]
fn test_inactive_principal_is_denied_everywhere() {
    let inactive = PrincipalFactory::superuser()
        .with_permissions(codes::ALL.iter().map(|(code, _)| *code))
        .inactive();

    for (_, policy) in standard_policies() {
        assert_denied(&authorize(Some(&inactive), &policy, None), &DenyReason::Inactive);
    }
}

#[test]
fn test_anonymous_is_unauthenticated_for_every_policy() {
    for (_, policy) in standard_policies() {
        assert_denied(&authorize(None, &policy, None), &DenyReason::Unauthenticated);
    }
}

#[test]
fn test_granting_more_permissions_never_revokes_access() {
    let policies = standard_policies();
    let all_codes: Vec<&str> = codes::ALL.iter().map(|(code, _)| *code).collect();

    for size in 0..=all_codes.len() {
        let smaller = PrincipalFactory::with(&all_codes[..size.saturating_sub(1)]);
        let larger = smaller.clone().with_permissions(all_codes[..size].iter().copied());

        for (operation, policy) in &policies {
            if policy.needs_target() {
                continue;
            }
            let before = authorize(Some(&smaller), policy, None).is_allowed();
            let after = authorize(Some(&larger), policy, None).is_allowed();
            assert!(!before || after, "{} lost access after a grant", operation);
        }
    }
}

#[test]
fn test_denial_names_the_first_missing_code() {
    let policy = PolicyExpression::require(codes::REPORTS_VIEW)
        & PolicyExpression::require(codes::REPORTS_EXPORT);

    let viewer = PrincipalFactory::with(&[codes::REPORTS_VIEW]);
    assert_denied(
        &authorize(Some(&viewer), &policy, None),
        &DenyReason::MissingPermission(codes::REPORTS_EXPORT.to_string()),
    );

    let exporter = PrincipalFactory::with(&[codes::REPORTS_VIEW, codes::REPORTS_EXPORT]);
    assert_allowed(&authorize(Some(&exporter), &policy, None));
}

#[test]
fn test_owner_rule_depends_on_target() {
    let principal = PrincipalFactory::plain();
    let own = TargetOwner::Identity(principal.id);
    let foreign = TargetOwner::Owner(Uuid::new_v4());

    assert_allowed(&authorize(Some(&principal), &PolicyExpression::Owner, Some(&own)));
    assert_denied(
        &authorize(Some(&principal), &PolicyExpression::Owner, Some(&foreign)),
        &DenyReason::NotOwner,
    );
    assert_denied(
        &authorize(Some(&principal), &PolicyExpression::Owner, None),
        &DenyReason::MissingTarget,
    );
}

#[test]
fn test_standard_table_references_only_catalog_codes() {
    let known: Vec<&str> = codes::ALL.iter().map(|(code, _)| *code).collect();

    for code in PolicyBinder::standard().referenced_permissions() {
        assert!(known.contains(&code.as_str()), "{} is not in the catalog", code);
    }
}

#[test]
fn test_every_report_operation_is_bound() {
    let binder = PolicyBinder::standard();
    let bound = binder.operations_for(Resource::Report);

    for action in [
        Action::List,
        Action::Retrieve,
        Action::Stats,
        Action::ByBranch,
        Action::HighBalance,
        Action::SearchCustomer,
        Action::RecentAccounts,
        Action::Export,
        Action::Permissions,
        Action::Health,
    ] {
        let operation = Operation::new(Resource::Report, action);
        assert!(bound.contains(&operation), "{} is unbound", operation);
    }
}
