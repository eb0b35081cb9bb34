//! Department endpoints

use crate::auth::policy::{Action, Operation, Resource};
use crate::core::models::Department;
use crate::core::org::DepartmentPatch;
use crate::core::reports::PageRequest;
use crate::server::routes::paginate;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::info;

const LIST: Operation = Operation::new(Resource::Department, Action::List);
const RETRIEVE: Operation = Operation::new(Resource::Department, Action::Retrieve);
const CREATE: Operation = Operation::new(Resource::Department, Action::Create);
const UPDATE: Operation = Operation::new(Resource::Department, Action::Update);
const PARTIAL_UPDATE: Operation = Operation::new(Resource::Department, Action::PartialUpdate);
const DESTROY: Operation = Operation::new(Resource::Department, Action::Destroy);

/// Configure department routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/departments")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{code}", web::get().to(retrieve))
            .route("/{code}", web::put().to(update))
            .route("/{code}", web::patch().to(partial_update))
            .route("/{code}", web::delete().to(destroy)),
    );
}

#[derive(Debug, Deserialize)]
struct DepartmentQuery {
    branch: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DepartmentQuery>,
) -> Result<HttpResponse> {
    state.guard(&req, LIST).await?;
    let query = query.into_inner();

    let departments = state.directory.list_departments(query.branch.as_deref());
    let page = paginate(
        &state,
        departments,
        PageRequest {
            page: query.page,
            page_size: query.page_size,
        },
        "/api/departments",
    )?;
    Ok(HttpResponse::Ok().json(page))
}

async fn retrieve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, RETRIEVE).await?;
    Ok(HttpResponse::Ok().json(state.directory.get_department(&path)?))
}

async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    department: web::Json<Department>,
) -> Result<HttpResponse> {
    state.guard(&req, CREATE).await?;
    let department = state.directory.create_department(department.into_inner())?;
    info!("Created department {}", department.code);
    Ok(HttpResponse::Created().json(department))
}

async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    patch: web::Json<DepartmentPatch>,
) -> Result<HttpResponse> {
    state.guard(&req, UPDATE).await?;
    let department = state.directory.update_department(&path, patch.into_inner())?;
    Ok(HttpResponse::Ok().json(department))
}

async fn partial_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    patch: web::Json<DepartmentPatch>,
) -> Result<HttpResponse> {
    state.guard(&req, PARTIAL_UPDATE).await?;
    let department = state.directory.update_department(&path, patch.into_inner())?;
    Ok(HttpResponse::Ok().json(department))
}

async fn destroy(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.guard(&req, DESTROY).await?;
    let department = state.directory.delete_department(&path)?;
    info!("Deleted department {}", department.code);
    Ok(HttpResponse::NoContent().finish())
}
