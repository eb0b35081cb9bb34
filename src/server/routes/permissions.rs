//! Permission catalog endpoints

use crate::auth::policy::{Action, Operation, Resource};
use crate::core::reports::PageRequest;
use crate::server::routes::paginate;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::info;

const LIST: Operation = Operation::new(Resource::Permission, Action::List);
const RETRIEVE: Operation = Operation::new(Resource::Permission, Action::Retrieve);
const CREATE: Operation = Operation::new(Resource::Permission, Action::Create);
const UPDATE: Operation = Operation::new(Resource::Permission, Action::Update);
const PARTIAL_UPDATE: Operation = Operation::new(Resource::Permission, Action::PartialUpdate);
const DESTROY: Operation = Operation::new(Resource::Permission, Action::Destroy);

/// Configure permission routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/permissions")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{code}", web::get().to(retrieve))
            .route("/{code}", web::put().to(update))
            .route("/{code}", web::patch().to(partial_update))
            .route("/{code}", web::delete().to(destroy)),
    );
}

#[derive(Debug, Deserialize)]
struct CreatePermissionRequest {
    code: String,
    #[serde(alias = "name")]
    display_name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatePermissionRequest {
    #[serde(default, alias = "name")]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, LIST).await?;
    let permissions = state.directory.list_permissions();
    let page = paginate(&state, permissions, page.into_inner(), "/api/permissions")?;
    Ok(HttpResponse::Ok().json(page))
}

async fn retrieve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, RETRIEVE).await?;
    Ok(HttpResponse::Ok().json(state.directory.get_permission(&path)?))
}

async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreatePermissionRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, CREATE).await?;
    let request = request.into_inner();

    let permission = state.directory.create_permission(
        &request.code,
        &request.display_name,
        request.description,
    )?;
    Ok(HttpResponse::Created().json(permission))
}

async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdatePermissionRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, UPDATE).await?;
    apply_update(&state, &path, request.into_inner())
}

async fn partial_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdatePermissionRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, PARTIAL_UPDATE).await?;
    apply_update(&state, &path, request.into_inner())
}

fn apply_update(
    state: &AppState,
    code: &str,
    request: UpdatePermissionRequest,
) -> Result<HttpResponse> {
    let permission = state.directory.update_permission(
        code,
        request.display_name.as_deref(),
        request.description,
    )?;
    Ok(HttpResponse::Ok().json(permission))
}

async fn destroy(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, DESTROY).await?;
    let permission = state.directory.remove_permission(&path)?;
    info!("Removed permission {}", permission.code);
    Ok(HttpResponse::NoContent().finish())
}
