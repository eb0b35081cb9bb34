//! User (principal) management

mod table;
mod types;

pub use table::UserTable;
pub use types::{NewUser, UserPatch};
pub(crate) use types::nullable;
