//! Tests for the directory store

use super::*;
use crate::auth::rbac::{codes, RolePatch, ADMINISTRATOR_ROLE};
use crate::config::{BootstrapAdmin, RbacConfig};
use crate::core::models::{Branch, Department};
use crate::core::user_management::{NewUser, UserPatch};
use crate::utils::error::GatewayError;
use std::collections::BTreeSet;
use std::sync::Arc;

fn seeded() -> Directory {
    let directory = Directory::new();
    directory.seed_defaults().unwrap();
    directory
}

fn codes_of(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_seed_defaults_twice() {
    let directory = Directory::new();
    directory.seed_defaults().unwrap();
    let first = directory.list_permissions();

    let outcome = directory.seed_defaults().unwrap();
    assert_eq!(outcome.permissions_created, 0);
    assert!(!outcome.administrator_created);
    assert_eq!(directory.list_permissions(), first);
    assert_eq!(directory.list_roles().len(), 1);
}

#[test]
fn test_bootstrap_creates_superuser_once() {
    let directory = Directory::new();
    let config = RbacConfig {
        bootstrap_admin: Some(BootstrapAdmin {
            email: "root@example.com".to_string(),
            password: "adminpassword".to_string(),
            first_name: "Root".to_string(),
            last_name: String::new(),
        }),
        ..RbacConfig::default()
    };

    directory.bootstrap(&config).unwrap();
    directory.bootstrap(&config).unwrap();

    let users = directory.list_users();
    assert_eq!(users.len(), 1);
    let admin = &users[0];
    assert!(admin.is_superuser);
    assert!(admin.is_staff);

    let role = directory.get_role(admin.role.unwrap()).unwrap();
    assert_eq!(role.name, ADMINISTRATOR_ROLE);
}

#[test]
fn test_bootstrap_without_seeding() {
    let directory = Directory::new();
    let config = RbacConfig {
        seed_defaults: false,
        ..RbacConfig::default()
    };
    assert!(directory.bootstrap(&config).unwrap().is_none());
    assert!(directory.list_permissions().is_empty());
}

#[test]
fn test_principal_reflects_role_changes() {
    let directory = seeded();
    let role = directory
        .create_role("Viewers", None, codes_of(&[codes::REPORTS_VIEW]))
        .unwrap();
    let user = directory
        .create_user(NewUser::new("v@example.com", "h").with_role(role.id))
        .unwrap();

    let principal = directory.principal(user.id).unwrap();
    assert!(principal.has_permission(codes::REPORTS_VIEW));

    directory.grant(role.id, codes::REPORTS_EXPORT).unwrap();
    let principal = directory.principal(user.id).unwrap();
    assert!(principal.has_permission(codes::REPORTS_EXPORT));
    assert_eq!(
        directory.user_permissions(&user),
        codes_of(&[codes::REPORTS_EXPORT, codes::REPORTS_VIEW])
    );

    assert!(directory.principal(uuid::Uuid::new_v4()).is_none());
}

#[test]
fn test_failed_role_update_is_atomic() {
    let directory = seeded();
    let role = directory
        .create_role("Viewers", None, codes_of(&[codes::REPORTS_VIEW]))
        .unwrap();

    let result = directory.update_role(
        role.id,
        RolePatch::permissions([codes::BRANCH_VIEW, "unknown.code"]),
    );

    assert!(matches!(result, Err(GatewayError::UnknownPermission(_))));
    assert_eq!(directory.get_role(role.id).unwrap(), role);
}

#[test]
fn test_role_in_use_leaves_role_and_user_unchanged() {
    let directory = seeded();
    let role = directory.create_role("Tellers", None, BTreeSet::new()).unwrap();
    let user = directory
        .create_user(NewUser::new("t@example.com", "h").with_role(role.id))
        .unwrap();

    let result = directory.delete_role(role.id);
    assert!(matches!(result, Err(GatewayError::RoleInUse { principals: 1, .. })));
    assert_eq!(directory.get_role(role.id).unwrap(), role);
    assert_eq!(directory.get_user(user.id).unwrap().role, Some(role.id));

    let patch = UserPatch {
        role: Some(None),
        ..UserPatch::default()
    };
    directory.update_user(user.id, patch).unwrap();
    directory.delete_role(role.id).unwrap();
}

#[test]
fn test_permission_lifecycle() {
    let directory = seeded();

    let created = directory
        .create_permission("loans.view", "Can view loans", None)
        .unwrap();
    assert_eq!(created.code, "loans.view");
    assert!(matches!(
        directory.create_permission("loans.view", "Again", None),
        Err(GatewayError::DuplicateCode(_))
    ));
    assert!(matches!(
        directory.create_permission("Loans View", "Bad", None),
        Err(GatewayError::Validation(_))
    ));

    let updated = directory
        .update_permission("loans.view", Some("View loans"), Some("Loan book".to_string()))
        .unwrap();
    assert_eq!(updated.display_name, "View loans");
    assert_eq!(updated.description.as_deref(), Some("Loan book"));

    let role = directory
        .create_role("Loans", None, codes_of(&["loans.view"]))
        .unwrap();
    assert!(matches!(
        directory.remove_permission("loans.view"),
        Err(GatewayError::PermissionInUse { .. })
    ));

    directory.revoke(role.id, "loans.view").unwrap();
    directory.remove_permission("loans.view").unwrap();
    assert!(matches!(
        directory.get_permission("loans.view"),
        Err(GatewayError::NotFound(_))
    ));
}

#[test]
fn test_department_with_unknown_branch_creates_nothing() {
    let directory = seeded();
    let result = directory.create_department(Department {
        code: "D1".to_string(),
        name: "Operations".to_string(),
        branch: "404".to_string(),
    });

    assert!(matches!(result, Err(GatewayError::UnknownBranch(_))));
    assert!(directory.list_departments(None).is_empty());
}

#[test]
fn test_deleting_manager_clears_branch_reference() {
    let directory = seeded();
    let manager = directory
        .create_user(NewUser::new("m@example.com", "h"))
        .unwrap();
    directory
        .create_branch(Branch {
            code: "001".to_string(),
            name: "Head Office".to_string(),
            manager: Some(manager.id),
        })
        .unwrap();

    directory.delete_user(manager.id).unwrap();
    assert_eq!(directory.get_branch("001").unwrap().manager, None);
}

#[test]
fn test_concurrent_reads_and_writes() {
    let directory = Arc::new(seeded());
    let role = directory.create_role("Shared", None, BTreeSet::new()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let directory = Arc::clone(&directory);
            std::thread::spawn(move || {
                let code = if i % 2 == 0 {
                    codes::REPORTS_VIEW
                } else {
                    codes::ACCOUNT_VIEW
                };
                directory.grant(role.id, code).unwrap();
                directory.list_roles().len()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap() >= 2);
    }
    assert_eq!(
        directory.get_role(role.id).unwrap().permission_codes,
        codes_of(&[codes::ACCOUNT_VIEW, codes::REPORTS_VIEW])
    );
}
