//! User management endpoints

use crate::auth::NewAccount;
use crate::auth::policy::{
    AccessTarget, Action, Operation, PolicyExpression, Principal, Resource, TargetOwner,
};
use crate::core::models::User;
use crate::core::reports::PageRequest;
use crate::core::user_management::UserPatch;
use crate::server::routes::paginate;
use crate::server::state::AppState;
use crate::storage::Directory;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;
use uuid::Uuid;

const LIST: Operation = Operation::new(Resource::User, Action::List);
const RETRIEVE: Operation = Operation::new(Resource::User, Action::Retrieve);
const CREATE: Operation = Operation::new(Resource::User, Action::Create);
const UPDATE: Operation = Operation::new(Resource::User, Action::Update);
const PARTIAL_UPDATE: Operation = Operation::new(Resource::User, Action::PartialUpdate);
const DESTROY: Operation = Operation::new(Resource::User, Action::Destroy);
const CHANGE_PASSWORD: Operation = Operation::new(Resource::User, Action::ChangePassword);

/// Configure user routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(retrieve))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::patch().to(partial_update))
            .route("/{id}", web::delete().to(destroy))
            .route("/{id}/change_password", web::post().to(change_password)),
    );
}

/// User as returned by the API, with its role's permissions
#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    pub role_name: Option<String>,
    pub permissions: BTreeSet<String>,
}

impl UserView {
    pub fn new(directory: &Directory, user: User) -> Self {
        let role_name = user
            .role
            .and_then(|id| directory.get_role(id).ok())
            .map(|role| role.name);
        Self {
            full_name: user.full_name(),
            permissions: directory.user_permissions(&user),
            role_name,
            user,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
}

/// Staff and superusers see every account, everyone else only their own.
/// No principal only gets this far in development mode.
fn visible(principal: Option<&Principal>, user: &User) -> bool {
    principal.is_none_or(|p| p.is_superuser || p.is_staff || p.id == user.id)
}

fn load_visible(state: &AppState, principal: Option<&Principal>, id: Uuid) -> Result<User> {
    let user = state.directory.get_user(id)?;
    if !visible(principal, &user) {
        return Err(GatewayError::not_found(format!("User {}", id)));
    }
    Ok(user)
}

async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    let principal = state.guard(&req, LIST).await?;

    let users: Vec<UserView> = state
        .directory
        .list_users()
        .into_iter()
        .filter(|user| visible(principal.as_ref(), user))
        .map(|user| UserView::new(&state.directory, user))
        .collect();

    let page = paginate(&state, users, page.into_inner(), "/api/users")?;
    Ok(HttpResponse::Ok().json(page))
}

async fn retrieve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let principal = state.guard(&req, RETRIEVE).await?;
    let user = load_visible(&state, principal.as_ref(), path.into_inner())?;
    Ok(HttpResponse::Ok().json(UserView::new(&state.directory, user)))
}

async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<NewAccount>,
) -> Result<HttpResponse> {
    let principal = state.guard(&req, CREATE).await?;
    let privileged = principal.is_some()
        && state
            .dispatcher
            .require(principal.as_ref(), &PolicyExpression::Superuser, None)
            .is_ok();

    let user = state.auth.create_account(request.into_inner(), privileged)?;
    Ok(HttpResponse::Created().json(UserView::new(&state.directory, user)))
}

async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    patch: web::Json<UserPatch>,
) -> Result<HttpResponse> {
    apply_patch(&state, &req, UPDATE, path.into_inner(), patch.into_inner()).await
}

async fn partial_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    patch: web::Json<UserPatch>,
) -> Result<HttpResponse> {
    apply_patch(&state, &req, PARTIAL_UPDATE, path.into_inner(), patch.into_inner()).await
}

async fn apply_patch(
    state: &AppState,
    req: &HttpRequest,
    operation: Operation,
    id: Uuid,
    patch: UserPatch,
) -> Result<HttpResponse> {
    let principal = state.guard(req, operation).await?;
    load_visible(state, principal.as_ref(), id)?;

    if patch.touches_privileged_fields() {
        state
            .dispatcher
            .require(principal.as_ref(), &PolicyExpression::Superuser, None)?;
    }

    let user = state.directory.update_user(id, patch)?;
    info!("Updated user {}", user.email);
    Ok(HttpResponse::Ok().json(UserView::new(&state.directory, user)))
}

async fn destroy(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let principal = state.guard(&req, DESTROY).await?;
    let id = path.into_inner();
    load_visible(&state, principal.as_ref(), id)?;

    let user = state.directory.delete_user(id)?;
    info!("Deleted user {}", user.email);
    Ok(HttpResponse::NoContent().finish())
}

async fn change_password(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    // An unknown id is checked as an unowned target so the denial comes first
    let user = state.directory.get_user(path.into_inner());
    let target: &dyn AccessTarget = match &user {
        Ok(user) => user,
        Err(_) => &TargetOwner::Unowned,
    };
    state.guard_target(&req, CHANGE_PASSWORD, target).await?;
    let user = user?;

    state
        .auth
        .change_password(user.id, &request.old_password, &request.new_password)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "password set" })))
}
