//! Authentication endpoints

use crate::auth::NewAccount;
use crate::auth::jwt::TokenPair;
use crate::auth::policy::{Action, DenyReason, Operation, Resource};
use crate::server::middleware::extract_bearer_token;
use crate::server::routes::users::UserView;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

const LOGIN: Operation = Operation::new(Resource::Auth, Action::Login);
const REGISTER: Operation = Operation::new(Resource::Auth, Action::Register);
const REFRESH: Operation = Operation::new(Resource::Auth, Action::Refresh);
const LOGOUT: Operation = Operation::new(Resource::Auth, Action::Logout);
const ME: Operation = Operation::new(Resource::Auth, Action::Me);

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/register", web::post().to(register))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RefreshRequest {
    #[serde(alias = "refresh")]
    refresh_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct LogoutRequest {
    #[serde(default, alias = "refresh")]
    refresh_token: Option<String>,
}

/// User plus a fresh session
#[derive(Debug, Serialize)]
struct AuthResponse {
    user: UserView,
    tokens: TokenPair,
}

async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, LOGIN).await?;
    info!("User login attempt: {}", request.email);

    let (user, tokens) = state.auth.login(&request.email, &request.password).await?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserView::new(&state.directory, user),
        tokens,
    }))
}

async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<NewAccount>,
) -> Result<HttpResponse> {
    state.guard(&req, REGISTER).await?;
    info!("User registration attempt: {}", request.email);

    let (user, tokens) = state.auth.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserView::new(&state.directory, user),
        tokens,
    }))
}

async fn refresh(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    state.guard(&req, REFRESH).await?;
    let tokens = state.auth.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: Option<web::Json<LogoutRequest>>,
) -> Result<HttpResponse> {
    state.guard(&req, LOGOUT).await?;
    let access_token = extract_bearer_token(req.headers())
        .ok_or_else(|| GatewayError::bad_request("No session to close"))?;
    let request = request.map(web::Json::into_inner).unwrap_or_default();

    state
        .auth
        .logout(access_token, request.refresh_token.as_deref())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = state
        .guard(&req, ME)
        .await?
        .ok_or(GatewayError::Denied(DenyReason::Unauthenticated))?;

    let user = state.directory.get_user(principal.id)?;
    Ok(HttpResponse::Ok().json(UserView::new(&state.directory, user)))
}
