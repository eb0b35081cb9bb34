//! Session token issuing and revocation

use crate::auth::jwt::{JwtHandler, TokenPair, TokenType};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Issues opaque token pairs and maps tokens back to their subject
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// New access + refresh pair for a user
    async fn issue(&self, user_id: Uuid) -> Result<TokenPair>;

    /// Invalidate a token of either kind
    async fn revoke(&self, token: &str) -> Result<()>;

    /// Subject of a valid, unrevoked access token
    async fn subject(&self, access_token: &str) -> Result<Uuid>;

    /// Subject of a refresh token, which is consumed by the call
    async fn redeem(&self, refresh_token: &str) -> Result<Uuid>;
}

#[async_trait]
impl SessionIssuer for JwtHandler {
    async fn issue(&self, user_id: Uuid) -> Result<TokenPair> {
        self.create_token_pair(user_id)
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        self.revoke_token(token).map(|_| ())
    }

    async fn subject(&self, access_token: &str) -> Result<Uuid> {
        self.verify_token(access_token, TokenType::Access)
            .map(|claims| claims.sub)
    }

    async fn redeem(&self, refresh_token: &str) -> Result<Uuid> {
        let claims = self.verify_token(refresh_token, TokenType::Refresh)?;
        self.revoke_token(refresh_token)?;
        Ok(claims.sub)
    }
}
