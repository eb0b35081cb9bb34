//! Account-base reporting endpoints

use crate::auth::policy::{Action, Operation, PolicyExpression, Principal, Resource};
use crate::auth::rbac::codes;
use crate::core::reports::{PageRequest, ReportQuery};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const LIST: Operation = Operation::new(Resource::Report, Action::List);
const RETRIEVE: Operation = Operation::new(Resource::Report, Action::Retrieve);
const STATS: Operation = Operation::new(Resource::Report, Action::Stats);
const BY_BRANCH: Operation = Operation::new(Resource::Report, Action::ByBranch);
const HIGH_BALANCE: Operation = Operation::new(Resource::Report, Action::HighBalance);
const SEARCH_CUSTOMER: Operation = Operation::new(Resource::Report, Action::SearchCustomer);
const RECENT_ACCOUNTS: Operation = Operation::new(Resource::Report, Action::RecentAccounts);
const EXPORT: Operation = Operation::new(Resource::Report, Action::Export);
const PERMISSIONS: Operation = Operation::new(Resource::Report, Action::Permissions);
const HEALTH: Operation = Operation::new(Resource::Report, Action::Health);

/// Configure reporting routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports/account-base")
            .route("", web::get().to(list))
            .route("/", web::get().to(list))
            .route("/stats", web::get().to(stats))
            .route("/by_branch", web::get().to(by_branch))
            .route("/high_balance", web::get().to(high_balance))
            .route("/search_customer", web::get().to(search_customer))
            .route("/recent_accounts", web::get().to(recent_accounts))
            .route("/export", web::get().to(export))
            .route("/permissions", web::get().to(permission_summary))
            .route("/health", web::get().to(health))
            .route("/{account_number}", web::get().to(retrieve)),
    );
}

#[derive(Debug, Deserialize)]
struct BranchQuery {
    branch_code: Option<String>,
    branch_name: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct HighBalanceQuery {
    min_balance: Option<f64>,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    branch_code: Option<String>,
}

/// What the caller may do with account reports
#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionSummary {
    pub user_id: Option<Uuid>,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub can_view_accounts: bool,
    pub can_view_reports: bool,
    pub can_export: bool,
    /// Report operations the caller is allowed to perform
    pub accessible_endpoints: Vec<String>,
}

impl PermissionSummary {
    fn compute(state: &AppState, principal: Option<&Principal>) -> Self {
        let holds = |code: &str| {
            state
                .dispatcher
                .require(principal, &PolicyExpression::require(code), None)
                .is_ok()
        };

        let accessible_endpoints = state
            .dispatcher
            .binder()
            .operations_for(Resource::Report)
            .into_iter()
            .filter(|operation| state.dispatcher.permits(*operation, principal))
            .map(|operation| operation.action.as_str().to_string())
            .collect();

        Self {
            user_id: principal.map(|p| p.id),
            is_superuser: principal.is_some_and(|p| p.is_superuser),
            is_staff: principal.is_some_and(|p| p.is_staff),
            can_view_accounts: holds(codes::ACCOUNT_VIEW),
            can_view_reports: holds(codes::REPORTS_VIEW),
            can_export: holds(codes::REPORTS_EXPORT),
            accessible_endpoints,
        }
    }
}

async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, LIST).await?;
    Ok(HttpResponse::Ok().json(state.reports.list(&query).await?))
}

async fn retrieve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, RETRIEVE).await?;
    Ok(HttpResponse::Ok().json(state.reports.retrieve(&path).await?))
}

async fn stats(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    state.guard(&req, STATS).await?;
    Ok(HttpResponse::Ok().json(state.reports.stats().await?))
}

async fn by_branch(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<BranchQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, BY_BRANCH).await?;
    let page = state
        .reports
        .by_branch(
            query.branch_code.as_deref(),
            query.branch_name.as_deref(),
            PageRequest {
                page: query.page,
                page_size: query.page_size,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn high_balance(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<HighBalanceQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, HIGH_BALANCE).await?;
    let page = state
        .reports
        .high_balance(
            query.min_balance,
            PageRequest {
                page: query.page,
                page_size: query.page_size,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn search_customer(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, SEARCH_CUSTOMER).await?;
    let page = state
        .reports
        .search_customer(
            &query.q,
            PageRequest {
                page: query.page,
                page_size: query.page_size,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn recent_accounts(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, RECENT_ACCOUNTS).await?;
    Ok(HttpResponse::Ok().json(state.reports.recent_accounts(query.limit).await?))
}

async fn export(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, EXPORT).await?;
    let rows = state.reports.export(query.branch_code.as_deref()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

async fn permission_summary(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = state.guard(&req, PERMISSIONS).await?;
    Ok(HttpResponse::Ok().json(PermissionSummary::compute(&state, principal.as_ref())))
}

async fn health(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    state.guard(&req, HEALTH).await?;
    Ok(HttpResponse::Ok().json(state.reports.health().await?))
}
