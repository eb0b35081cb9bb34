//! Canonical permission codes
//!
//! Codes use a dotted `resource.action` scheme.

pub const USER_VIEW: &str = "user.view";
pub const USER_ADD: &str = "user.add";
pub const USER_CHANGE: &str = "user.change";
pub const USER_DELETE: &str = "user.delete";
pub const ROLE_VIEW: &str = "role.view";
pub const ROLE_MANAGE: &str = "role.manage";
pub const PERMISSION_VIEW: &str = "permission.view";
pub const PERMISSION_MANAGE: &str = "permission.manage";
pub const BRANCH_VIEW: &str = "branch.view";
pub const BRANCH_MANAGE: &str = "branch.manage";
pub const DEPARTMENT_VIEW: &str = "department.view";
pub const DEPARTMENT_MANAGE: &str = "department.manage";
pub const ACCOUNT_VIEW: &str = "account.view";
pub const REPORTS_VIEW: &str = "reports.view";
pub const REPORTS_EXPORT: &str = "reports.export";

/// Every canonical code with its display name
pub const ALL: &[(&str, &str)] = &[
    (USER_VIEW, "Can view users"),
    (USER_ADD, "Can add users"),
    (USER_CHANGE, "Can change users"),
    (USER_DELETE, "Can delete users"),
    (ROLE_VIEW, "Can view roles"),
    (ROLE_MANAGE, "Can manage roles"),
    (PERMISSION_VIEW, "Can view permissions"),
    (PERMISSION_MANAGE, "Can manage permissions"),
    (BRANCH_VIEW, "Can view branches"),
    (BRANCH_MANAGE, "Can manage branches"),
    (DEPARTMENT_VIEW, "Can view departments"),
    (DEPARTMENT_MANAGE, "Can manage departments"),
    (ACCOUNT_VIEW, "Can view account reports"),
    (REPORTS_VIEW, "Can view reports"),
    (REPORTS_EXPORT, "Can export reports"),
];

/// Check that a code looks like `resource.action`
///
/// Each segment is lowercase ASCII letters, digits or underscores.
pub fn is_well_formed(code: &str) -> bool {
    let mut segments = code.split('.');
    let (Some(resource), Some(action), None) = (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };

    [resource, action].iter().all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    })
}
