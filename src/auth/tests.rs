//! Tests for logins, sessions and account credentials

use super::*;
use crate::auth::policy::DenyReason;
use crate::config::AuthConfig;
use crate::core::user_management::UserPatch;
use crate::storage::Directory;
use crate::utils::error::GatewayError;
use std::sync::Arc;

fn account(email: &str, password: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: password.to_string(),
        first_name: "Abebe".to_string(),
        last_name: "Kebede".to_string(),
        is_staff: false,
        is_superuser: false,
        role: None,
        branch: None,
    }
}

fn create_auth_system() -> AuthSystem {
    let directory = Arc::new(Directory::new());
    directory.seed_defaults().unwrap();
    AuthSystem::new(&AuthConfig::default(), directory)
}

#[tokio::test]
async fn test_login_stamps_last_login() {
    let auth = create_auth_system();
    let user = auth
        .create_account(account("teller@example.com", "password123"), false)
        .unwrap();
    assert!(user.last_login.is_none());

    let (logged_in, tokens) = auth.login("Teller@Example.com", "password123").await.unwrap();
    assert_eq!(logged_in.id, user.id);
    assert!(logged_in.last_login.is_some());
    assert_eq!(tokens.token_type, "Bearer");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let auth = create_auth_system();
    auth.create_account(account("teller@example.com", "password123"), false)
        .unwrap();

    assert!(matches!(
        auth.login("teller@example.com", "wrong-password").await,
        Err(GatewayError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.login("nobody@example.com", "password123").await,
        Err(GatewayError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_login_rejects_inactive_account() {
    let auth = create_auth_system();
    let user = auth
        .create_account(account("gone@example.com", "password123"), false)
        .unwrap();
    auth.directory()
        .update_user(
            user.id,
            UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
        )
        .unwrap();

    assert!(matches!(
        auth.login("gone@example.com", "password123").await,
        Err(GatewayError::Denied(DenyReason::Inactive))
    ));
}

#[tokio::test]
async fn test_register_drops_privileges() {
    let auth = create_auth_system();
    let mut request = account("sneaky@example.com", "password123");
    request.is_superuser = true;
    request.is_staff = true;

    let (user, _) = auth.register(request).await.unwrap();
    assert!(!user.is_superuser);
    assert!(!user.is_staff);
    assert!(user.role.is_none());
}

#[tokio::test]
async fn test_privileged_create_keeps_flags() {
    let auth = create_auth_system();
    let mut request = account("staff@example.com", "password123");
    request.is_staff = true;

    let user = auth.create_account(request, true).unwrap();
    assert!(user.is_staff);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let auth = create_auth_system();
    assert!(matches!(
        auth.create_account(account("a@example.com", "short"), false),
        Err(GatewayError::Validation(_))
    ));
    assert!(auth.directory().list_users().is_empty());
}

#[tokio::test]
async fn test_current_principal_and_logout() {
    let auth = create_auth_system();
    let (user, tokens) = auth
        .register(account("me@example.com", "password123"))
        .await
        .unwrap();

    let principal = auth.current_principal(&tokens.access_token).await.unwrap();
    assert_eq!(principal.id, user.id);
    assert!(principal.active);

    auth.logout(&tokens.access_token, Some(&tokens.refresh_token))
        .await
        .unwrap();
    assert!(auth.current_principal(&tokens.access_token).await.is_err());
    assert!(auth.refresh(&tokens.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_refresh_consumes_token() {
    let auth = create_auth_system();
    let (_, tokens) = auth
        .register(account("me@example.com", "password123"))
        .await
        .unwrap();

    let renewed = auth.refresh(&tokens.refresh_token).await.unwrap();
    assert!(auth.current_principal(&renewed.access_token).await.is_ok());
    assert!(matches!(
        auth.refresh(&tokens.refresh_token).await,
        Err(GatewayError::Auth(_))
    ));
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let auth = create_auth_system();
    let (_, tokens) = auth
        .register(account("me@example.com", "password123"))
        .await
        .unwrap();

    assert!(auth.refresh(&tokens.access_token).await.is_err());
}

#[tokio::test]
async fn test_deleted_user_loses_session() {
    let auth = create_auth_system();
    let (user, tokens) = auth
        .register(account("me@example.com", "password123"))
        .await
        .unwrap();
    auth.directory().delete_user(user.id).unwrap();

    assert!(matches!(
        auth.current_principal(&tokens.access_token).await,
        Err(GatewayError::Auth(_))
    ));
}

#[test]
fn test_change_password() {
    let auth = create_auth_system();
    let user = auth
        .create_account(account("me@example.com", "password123"), false)
        .unwrap();

    assert!(matches!(
        auth.change_password(user.id, "not-it", "newpassword1"),
        Err(GatewayError::Validation(msg)) if msg == "Wrong password"
    ));

    auth.change_password(user.id, "password123", "newpassword1")
        .unwrap();
    let stored = auth.directory().get_user(user.id).unwrap();
    assert!(
        crate::utils::auth::crypto::verify_password("newpassword1", &stored.password_hash)
            .unwrap()
    );
}
