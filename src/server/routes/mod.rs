//! HTTP route modules
//!
//! Every handler names its `(resource, action)` operation and passes it to
//! the dispatcher before touching any data.

pub mod auth;
pub mod branches;
pub mod departments;
pub mod health;
pub mod permissions;
pub mod reports;
pub mod roles;
pub mod users;

use crate::core::reports::{Page, PageRequest};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::web;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .configure(auth::configure_routes)
                .configure(users::configure_routes)
                .configure(roles::configure_routes)
                .configure(permissions::configure_routes)
                .configure(branches::configure_routes)
                .configure(departments::configure_routes)
                .configure(reports::configure_routes),
        );
}

/// Page of a listing, sized by the reports configuration
pub(crate) fn paginate<T>(
    state: &AppState,
    items: Vec<T>,
    request: PageRequest,
    path: &str,
) -> Result<Page<T>> {
    let page_size = state.config.reports().page_size(request.page_size);
    Page::paginate(items, request.page.unwrap_or(1), page_size, path)
}
