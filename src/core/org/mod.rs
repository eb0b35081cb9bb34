//! Org hierarchy: branches and the departments under them

mod directory;
#[cfg(test)]
mod tests;
mod types;

pub use directory::OrgDirectory;
pub use types::{BranchPatch, DepartmentPatch};
