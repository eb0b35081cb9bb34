//! Storage layer for the Gateway
//!
//! Identity and org data live in an in-process [`Directory`]; report
//! records come from a [`ReportSource`](crate::core::reports::ReportSource).

mod directory;
#[cfg(test)]
mod tests;

pub use directory::Directory;
