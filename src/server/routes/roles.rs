//! Role endpoints

use crate::auth::policy::{Action, Operation, Resource};
use crate::auth::rbac::RolePatch;
use crate::core::reports::PageRequest;
use crate::server::routes::paginate;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::info;
use uuid::Uuid;

const LIST: Operation = Operation::new(Resource::Role, Action::List);
const RETRIEVE: Operation = Operation::new(Resource::Role, Action::Retrieve);
const CREATE: Operation = Operation::new(Resource::Role, Action::Create);
const UPDATE: Operation = Operation::new(Resource::Role, Action::Update);
const PARTIAL_UPDATE: Operation = Operation::new(Resource::Role, Action::PartialUpdate);
const DESTROY: Operation = Operation::new(Resource::Role, Action::Destroy);

/// Configure role routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(retrieve))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::patch().to(partial_update))
            .route("/{id}", web::delete().to(destroy)),
    );
}

#[derive(Debug, Deserialize)]
struct CreateRoleRequest {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "permissions")]
    permission_codes: BTreeSet<String>,
}

async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, LIST).await?;
    let roles = state.directory.list_roles();
    Ok(HttpResponse::Ok().json(paginate(&state, roles, page.into_inner(), "/api/roles")?))
}

async fn retrieve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.guard(&req, RETRIEVE).await?;
    Ok(HttpResponse::Ok().json(state.directory.get_role(path.into_inner())?))
}

async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateRoleRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, CREATE).await?;
    let request = request.into_inner();

    let role = state
        .directory
        .create_role(&request.name, request.description, request.permission_codes)?;
    info!("Created role {}", role.name);
    Ok(HttpResponse::Created().json(role))
}

async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    patch: web::Json<RolePatch>,
) -> Result<HttpResponse> {
    state.guard(&req, UPDATE).await?;
    let role = state
        .directory
        .update_role(path.into_inner(), patch.into_inner())?;
    Ok(HttpResponse::Ok().json(role))
}

async fn partial_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    patch: web::Json<RolePatch>,
) -> Result<HttpResponse> {
    state.guard(&req, PARTIAL_UPDATE).await?;
    let role = state
        .directory
        .update_role(path.into_inner(), patch.into_inner())?;
    Ok(HttpResponse::Ok().json(role))
}

async fn destroy(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.guard(&req, DESTROY).await?;
    let role = state.directory.delete_role(path.into_inner())?;
    info!("Deleted role {}", role.name);
    Ok(HttpResponse::NoContent().finish())
}
