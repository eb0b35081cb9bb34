//! Default permissions and the administrator role

use super::catalog::PermissionCatalog;
use super::codes;
use super::registry::RoleRegistry;
use super::types::{Role, RolePatch};
use crate::utils::error::Result;
use std::collections::BTreeSet;
use tracing::info;

pub const ADMINISTRATOR_ROLE: &str = "Administrator";
pub const ADMINISTRATOR_DESCRIPTION: &str = "Full system access";

/// What a seeding run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub permissions_created: usize,
    pub administrator_created: bool,
    pub administrator_codes_added: usize,
}

/// Define the canonical permissions and the administrator role
///
/// Safe to run any number of times.
pub fn seed_defaults(
    catalog: &mut PermissionCatalog,
    roles: &mut RoleRegistry,
) -> Result<(Role, SeedOutcome)> {
    let mut outcome = SeedOutcome {
        permissions_created: catalog.seed_canonical(),
        ..SeedOutcome::default()
    };

    let canonical: BTreeSet<String> = codes::ALL.iter().map(|(code, _)| code.to_string()).collect();

    let role = match roles.find_by_name(ADMINISTRATOR_ROLE).cloned() {
        Some(existing) => {
            let missing = canonical.difference(&existing.permission_codes).count();
            if missing == 0 {
                existing
            } else {
                outcome.administrator_codes_added = missing;
                let codes = existing
                    .permission_codes
                    .union(&canonical)
                    .cloned()
                    .collect::<BTreeSet<_>>();
                roles.update(catalog, existing.id, RolePatch::permissions(codes))?
            }
        }
        None => {
            outcome.administrator_created = true;
            roles.create(
                catalog,
                ADMINISTRATOR_ROLE,
                Some(ADMINISTRATOR_DESCRIPTION.to_string()),
                canonical,
            )?
        }
    };

    info!(
        "Seeded defaults: {} new permission(s), administrator {}",
        outcome.permissions_created,
        if outcome.administrator_created {
            "created"
        } else {
            "present"
        }
    );
    Ok((role, outcome))
}
