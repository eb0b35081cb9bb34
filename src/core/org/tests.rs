//! Tests for the org hierarchy

use super::*;
use crate::auth::policy::{AccessTarget, TargetOwner};
use crate::auth::rbac::RoleRegistry;
use crate::core::models::{Branch, Department};
use crate::core::user_management::{NewUser, UserTable};
use crate::utils::error::GatewayError;

fn branch(code: &str, name: &str) -> Branch {
    Branch {
        code: code.to_string(),
        name: name.to_string(),
        manager: None,
    }
}

fn department(code: &str, branch: &str) -> Department {
    Department {
        code: code.to_string(),
        name: format!("Department {}", code),
        branch: branch.to_string(),
    }
}

#[test]
fn test_create_and_list() {
    let users = UserTable::new();
    let mut org = OrgDirectory::new();
    org.create_branch(branch("002", "Harbour"), &users).unwrap();
    org.create_branch(branch("001", " Head Office "), &users).unwrap();
    org.create_department(department("D1", "001")).unwrap();
    org.create_department(department("D2", "002")).unwrap();

    let codes: Vec<_> = org.list_branches().iter().map(|b| b.code.clone()).collect();
    assert_eq!(codes, vec!["001", "002"]);
    assert_eq!(org.get_branch("001").unwrap().name, "Head Office");
    assert_eq!(org.list_departments(None).len(), 2);
    assert_eq!(org.list_departments(Some("002"))[0].code, "D2");
}

#[test]
fn test_department_with_unknown_branch_is_rejected() {
    let mut org = OrgDirectory::new();
    let result = org.create_department(department("D1", "404"));

    assert!(matches!(result, Err(GatewayError::UnknownBranch(code)) if code == "404"));
    assert!(org.get_department("D1").is_none());
}

#[test]
fn test_duplicate_codes_rejected() {
    let users = UserTable::new();
    let mut org = OrgDirectory::new();
    org.create_branch(branch("001", "Head Office"), &users).unwrap();
    org.create_department(department("D1", "001")).unwrap();

    assert!(matches!(
        org.create_branch(branch("001", "Again"), &users),
        Err(GatewayError::DuplicateCode(_))
    ));
    assert!(matches!(
        org.create_department(department("D1", "001")),
        Err(GatewayError::DuplicateCode(_))
    ));
}

#[test]
fn test_blank_fields_rejected() {
    let users = UserTable::new();
    let mut org = OrgDirectory::new();
    assert!(matches!(
        org.create_branch(branch(" ", "Nowhere"), &users),
        Err(GatewayError::Validation(_))
    ));
}

#[test]
fn test_branch_with_departments_cannot_be_deleted() {
    let users = UserTable::new();
    let mut org = OrgDirectory::new();
    org.create_branch(branch("001", "Head Office"), &users).unwrap();
    org.create_department(department("D1", "001")).unwrap();

    let result = org.delete_branch("001", &users);
    assert!(matches!(
        result,
        Err(GatewayError::BranchInUse {
            departments: 1,
            users: 0,
            ..
        })
    ));
    assert!(org.branch_exists("001"));

    org.delete_department("D1").unwrap();
    org.delete_branch("001", &users).unwrap();
    assert!(!org.branch_exists("001"));
}

#[test]
fn test_branch_with_users_cannot_be_deleted() {
    let mut users = UserTable::new();
    let roles = RoleRegistry::new();
    let mut org = OrgDirectory::new();
    org.create_branch(branch("001", "Head Office"), &users).unwrap();
    users
        .create(NewUser::new("a@example.com", "h").with_branch("001"), &roles, &org)
        .unwrap();

    assert!(matches!(
        org.delete_branch("001", &users),
        Err(GatewayError::BranchInUse { users: 1, .. })
    ));
}

#[test]
fn test_branch_manager_and_ownership() {
    let mut users = UserTable::new();
    let roles = RoleRegistry::new();
    let mut org = OrgDirectory::new();
    org.create_branch(branch("001", "Head Office"), &users).unwrap();
    let manager = users
        .create(NewUser::new("m@example.com", "h"), &roles, &org)
        .unwrap();

    let patch = BranchPatch {
        manager: Some(Some(manager.id)),
        ..BranchPatch::default()
    };
    let updated = org.update_branch("001", patch, &users).unwrap();
    assert_eq!(updated.target_owner(), TargetOwner::Owner(manager.id));

    let unknown = BranchPatch {
        manager: Some(Some(uuid::Uuid::new_v4())),
        ..BranchPatch::default()
    };
    assert!(org.update_branch("001", unknown, &users).is_err());
    assert_eq!(org.get_branch("001").unwrap().manager, Some(manager.id));
}

#[test]
fn test_move_department_between_branches() {
    let users = UserTable::new();
    let mut org = OrgDirectory::new();
    org.create_branch(branch("001", "Head Office"), &users).unwrap();
    org.create_branch(branch("002", "Harbour"), &users).unwrap();
    org.create_department(department("D1", "001")).unwrap();

    let bad = DepartmentPatch {
        branch: Some("404".to_string()),
        ..DepartmentPatch::default()
    };
    assert!(matches!(
        org.update_department("D1", bad),
        Err(GatewayError::UnknownBranch(_))
    ));

    let good = DepartmentPatch {
        branch: Some("002".to_string()),
        ..DepartmentPatch::default()
    };
    assert_eq!(org.update_department("D1", good).unwrap().branch, "002");
}
