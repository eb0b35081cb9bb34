//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::auth::policy::{AccessTarget, Operation, Principal};
use crate::config::Config;
use crate::core::reports::{InMemoryReportSource, ReportService, ReportSource};
use crate::server::dispatcher::Dispatcher;
use crate::server::middleware::extract_bearer_token;
use crate::storage::Directory;
use crate::utils::error::Result;
use actix_web::HttpRequest;
use std::sync::Arc;
use tracing::{debug, info};

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Logins and sessions
    pub auth: Arc<AuthSystem>,
    /// Identity and org data
    pub directory: Arc<Directory>,
    /// Account-base reporting
    pub reports: Arc<ReportService>,
    /// Authorization gate
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: AuthSystem,
        directory: Arc<Directory>,
        reports: ReportService,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            directory,
            reports: Arc::new(reports),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Seed the directory, load report data and wire the collaborators
    pub async fn build(config: Config) -> Result<Self> {
        let directory = Arc::new(Directory::new());
        if let Some(outcome) = directory.bootstrap(config.rbac())? {
            info!(
                "Seeded {} permission(s); administrator role created: {}",
                outcome.permissions_created, outcome.administrator_created
            );
        }

        let source: Arc<dyn ReportSource> = match &config.reports().data_file {
            Some(path) => Arc::new(InMemoryReportSource::from_json_file(path).await?),
            None => {
                debug!("No report data file configured");
                Arc::new(InMemoryReportSource::new(Vec::new()))
            }
        };
        let reports = ReportService::new(source, config.reports().clone());

        let auth = AuthSystem::new(config.auth(), Arc::clone(&directory));
        let dispatcher = Dispatcher::standard(config.rbac().development_mode);

        Ok(Self::new(config, auth, directory, reports, dispatcher))
    }

    /// Principal behind the request's bearer token
    ///
    /// A missing, invalid, expired or revoked token yields `None`; the
    /// engine then reports the request as unauthenticated.
    pub async fn principal(&self, req: &HttpRequest) -> Option<Principal> {
        let token = extract_bearer_token(req.headers())?;
        match self.auth.current_principal(token).await {
            Ok(principal) => Some(principal),
            Err(e) => {
                debug!("Ignoring bearer token: {}", e);
                None
            }
        }
    }

    /// Load the principal and check a target-free operation
    pub async fn guard(&self, req: &HttpRequest, operation: Operation) -> Result<Option<Principal>> {
        let principal = self.principal(req).await;
        self.dispatcher
            .authorize(operation, principal.as_ref(), None)?;
        Ok(principal)
    }

    /// Load the principal and check an operation on a loaded object
    pub async fn guard_target(
        &self,
        req: &HttpRequest,
        operation: Operation,
        target: &dyn AccessTarget,
    ) -> Result<Option<Principal>> {
        let principal = self.principal(req).await;
        self.dispatcher
            .authorize(operation, principal.as_ref(), Some(target))?;
        Ok(principal)
    }
}
