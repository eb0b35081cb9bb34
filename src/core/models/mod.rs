//! Domain models shared by the stores, the policy engine and the HTTP layer

pub mod org;
pub mod report;
pub mod user;

pub use org::{Branch, Department};
pub use report::{AccountRecord, AccountSummary};
pub use user::User;
