//! Branch endpoints

use crate::auth::policy::{Action, Operation, Resource};
use crate::core::models::Branch;
use crate::core::org::BranchPatch;
use crate::core::reports::PageRequest;
use crate::server::routes::paginate;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

const LIST: Operation = Operation::new(Resource::Branch, Action::List);
const RETRIEVE: Operation = Operation::new(Resource::Branch, Action::Retrieve);
const CREATE: Operation = Operation::new(Resource::Branch, Action::Create);
const UPDATE: Operation = Operation::new(Resource::Branch, Action::Update);
const PARTIAL_UPDATE: Operation = Operation::new(Resource::Branch, Action::PartialUpdate);
const DESTROY: Operation = Operation::new(Resource::Branch, Action::Destroy);

/// Configure branch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/branches")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{code}", web::get().to(retrieve))
            .route("/{code}", web::put().to(update))
            .route("/{code}", web::patch().to(partial_update))
            .route("/{code}", web::delete().to(destroy)),
    );
}

async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, LIST).await?;
    let branches = state.directory.list_branches();
    let page = paginate(&state, branches, page.into_inner(), "/api/branches")?;
    Ok(HttpResponse::Ok().json(page))
}

async fn retrieve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, RETRIEVE).await?;
    Ok(HttpResponse::Ok().json(state.directory.get_branch(&path)?))
}

async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    branch: web::Json<Branch>,
) -> Result<HttpResponse> {
    state.guard(&req, CREATE).await?;
    let branch = state.directory.create_branch(branch.into_inner())?;
    info!("Created branch {}", branch.code);
    Ok(HttpResponse::Created().json(branch))
}

async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    patch: web::Json<BranchPatch>,
) -> Result<HttpResponse> {
    state.guard(&req, UPDATE).await?;
    let branch = state.directory.update_branch(&path, patch.into_inner())?;
    Ok(HttpResponse::Ok().json(branch))
}

async fn partial_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    patch: web::Json<BranchPatch>,
) -> Result<HttpResponse> {
    state.guard(&req, PARTIAL_UPDATE).await?;
    let branch = state.directory.update_branch(&path, patch.into_inner())?;
    Ok(HttpResponse::Ok().json(branch))
}

async fn destroy(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, DESTROY).await?;
    let branch = state.directory.delete_branch(&path)?;
    info!("Deleted branch {}", branch.code);
    Ok(HttpResponse::NoContent().finish())
}
