//! HTTP server implementation
//!
//! This module provides the HTTP server, the operation dispatcher and the
//! route handlers.

pub mod dispatcher;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use dispatcher::Dispatcher;
pub use server::HttpServer;
pub use state::AppState;
