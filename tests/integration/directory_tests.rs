//! Directory integrity across roles, users and the org hierarchy

use crate::common::seeded_directory;
use rbac_gateway::GatewayError;
use rbac_gateway::auth::rbac::{ADMINISTRATOR_ROLE, RolePatch, codes};
use rbac_gateway::core::models::{Branch, Department};
use rbac_gateway::core::org::BranchPatch;
use rbac_gateway::core::user_management::{NewUser, UserPatch};
use std::collections::BTreeSet;

fn code_set(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|code| code.to_string()).collect()
}

fn branch(code: &str) -> Branch {
    Branch {
        code: code.to_string(),
        name: format!("Branch {}", code),
        manager: None,
    }
}

#[test]
fn test_seeding_twice_changes_nothing() {
    let directory = seeded_directory();
    let permissions = directory.list_permissions();
    let roles = directory.list_roles();

    let outcome = directory.seed_defaults().unwrap();
    assert_eq!(outcome.permissions_created, 0);
    assert!(!outcome.administrator_created);
    assert_eq!(directory.list_permissions(), permissions);
    assert_eq!(directory.list_roles(), roles);

    let admin = roles.iter().find(|r| r.name == ADMINISTRATOR_ROLE).unwrap();
    assert_eq!(admin.permission_codes.len(), codes::ALL.len());
}

#[test]
fn test_role_edits_reach_the_next_principal_snapshot() {
    let directory = seeded_directory();
    let role = directory
        .create_role("Auditor", None, code_set(&[codes::REPORTS_VIEW]))
        .unwrap();
    let user = directory
        .create_user(NewUser::new("auditor@example.com", "hash").with_role(role.id))
        .unwrap();

    let before = directory.principal(user.id).unwrap();
    assert!(!before.has_permission(codes::REPORTS_EXPORT));

    directory.grant(role.id, codes::REPORTS_EXPORT).unwrap();
    let after = directory.principal(user.id).unwrap();
    assert!(after.has_permission(codes::REPORTS_EXPORT));
    // Snapshots are immutable
    assert!(!before.has_permission(codes::REPORTS_EXPORT));
}

#[test]
fn test_failed_role_update_leaves_role_untouched() {
    let directory = seeded_directory();
    let role = directory
        .create_role("Viewer", None, code_set(&[codes::USER_VIEW]))
        .unwrap();

    let patch = RolePatch {
        name: Some("Renamed".to_string()),
        description: None,
        permission_codes: Some(code_set(&[codes::ROLE_VIEW, "ghost.permission"])),
    };
    let err = directory.update_role(role.id, patch).unwrap_err();

    assert!(matches!(err, GatewayError::UnknownPermission(code) if code == "ghost.permission"));
    assert_eq!(directory.get_role(role.id).unwrap(), role);
}

#[test]
fn test_permission_removal_blocked_while_granted() {
    let directory = seeded_directory();

    let err = directory.remove_permission(codes::USER_VIEW).unwrap_err();
    assert!(matches!(err, GatewayError::PermissionInUse { roles: 1, .. }));

    directory
        .create_permission("ledger.close", "Can close the ledger", None)
        .unwrap();
    assert!(directory.remove_permission("ledger.close").is_ok());
    assert!(matches!(
        directory.get_permission("ledger.close"),
        Err(GatewayError::NotFound(_))
    ));
}

#[test]
fn test_role_in_use_until_user_moves() {
    let directory = seeded_directory();
    let role = directory.create_role("Teller", None, BTreeSet::new()).unwrap();
    let user = directory
        .create_user(NewUser::new("teller@example.com", "hash").with_role(role.id))
        .unwrap();

    assert!(matches!(
        directory.delete_role(role.id),
        Err(GatewayError::RoleInUse { principals: 1, .. })
    ));

    let patch = UserPatch {
        role: Some(None),
        ..UserPatch::default()
    };
    directory.update_user(user.id, patch).unwrap();
    assert!(directory.delete_role(role.id).is_ok());
}

#[test]
fn test_branch_lifecycle_with_dependents() {
    let directory = seeded_directory();
    directory.create_branch(branch("001")).unwrap();
    directory
        .create_department(Department {
            code: "OPS".to_string(),
            name: "Operations".to_string(),
            branch: "001".to_string(),
        })
        .unwrap();
    let user = directory
        .create_user(NewUser::new("ops@example.com", "hash").with_branch("001"))
        .unwrap();

    assert!(matches!(
        directory.delete_branch("001"),
        Err(GatewayError::BranchInUse { departments: 1, users: 1, .. })
    ));

    directory.delete_department("OPS").unwrap();
    directory
        .update_user(
            user.id,
            UserPatch {
                branch: Some(None),
                ..UserPatch::default()
            },
        )
        .unwrap();
    assert!(directory.delete_branch("001").is_ok());
}

#[test]
fn test_department_requires_existing_branch() {
    let directory = seeded_directory();
    let err = directory
        .create_department(Department {
            code: "HR".to_string(),
            name: "Human Resources".to_string(),
            branch: "404".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, GatewayError::UnknownBranch(code) if code == "404"));
    assert!(directory.list_departments(None).is_empty());
}

#[test]
fn test_deleting_manager_clears_branch_reference() {
    let directory = seeded_directory();
    let manager = directory
        .create_user(NewUser::new("manager@example.com", "hash"))
        .unwrap();
    directory.create_branch(branch("002")).unwrap();
    directory
        .update_branch(
            "002",
            BranchPatch {
                name: None,
                manager: Some(Some(manager.id)),
            },
        )
        .unwrap();

    directory.delete_user(manager.id).unwrap();
    assert_eq!(directory.get_branch("002").unwrap().manager, None);
}
