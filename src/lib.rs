//! # rbac-gateway
//!
//! Role-based access control for user, role, org-hierarchy and account
//! reporting resources, served over actix-web.
//!
//! - **Authorization engine**: a pure `authorize(principal, policy, target)`
//!   returning `Allow` or `Deny(reason)`.
//! - **Policy binder**: one enumerable table mapping every
//!   `(resource, action)` operation to its rule.
//! - **Permission catalog and role registry**: dotted `resource.action`
//!   codes bundled into roles, mutated all-or-nothing.
//! - **Org hierarchy**: branches and departments with referential checks.
//!
//! ```rust,no_run
//! use rbac_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use auth::policy::{
    Access, Action, Decision, DenyReason, Operation, PolicyBinder, PolicyExpression, Principal,
    Resource, authorize,
};
pub use config::Config;
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// Configured gateway, ready to serve
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;
        Ok(Self { config, server })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting {} {}", NAME, VERSION);
        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
