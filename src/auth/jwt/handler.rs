//! Core JWT handler implementation

use super::types::{Claims, JwtHandler, TokenPair, TokenType};
use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use dashmap::DashMap;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

const ISSUER: &str = "rbac-gateway";

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
            issuer: ISSUER.to_string(),
            revoked: Arc::new(DashMap::new()),
        }
    }

    /// Create a signed token of the given type
    pub fn create_token(&self, user_id: Uuid, token_type: TokenType) -> Result<String> {
        let now = now()?;
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + ttl,
            iss: self.issuer.clone(),
            aud: token_type.audience().to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GatewayError::Jwt)?;

        debug!("Created {:?} token for user: {}", token_type, user_id);
        Ok(token)
    }

    /// Create a token pair (access + refresh)
    pub fn create_token_pair(&self, user_id: Uuid) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_token(user_id, TokenType::Access)?,
            refresh_token: self.create_token(user_id, TokenType::Refresh)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl,
        })
    }

    /// Verify signature, expiry, revocation and token type
    pub fn verify_token(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let claims = self.decode(token)?;

        if claims.token_type != expected {
            return Err(GatewayError::auth(format!(
                "Expected a {} token",
                expected.audience()
            )));
        }
        if self.revoked.contains_key(&claims.jti) {
            return Err(GatewayError::auth("Token has been revoked"));
        }

        debug!("Token verified for user: {}", claims.sub);
        Ok(claims)
    }

    /// Blacklist a token until it would have expired anyway
    pub fn revoke_token(&self, token: &str) -> Result<Claims> {
        let claims = self.decode(token)?;
        self.purge_expired()?;
        self.revoked.insert(claims.jti.clone(), claims.exp);
        debug!("Revoked token {} for user {}", claims.jti, claims.sub);
        Ok(claims)
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.contains_key(jti)
    }

    /// Number of revocations still tracked
    pub fn revoked_count(&self) -> usize {
        self.revoked.len()
    }

    fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[
            TokenType::Access.audience(),
            TokenType::Refresh.audience(),
        ]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("JWT verification failed: {}", e);
                GatewayError::Jwt(e)
            })
    }

    fn purge_expired(&self) -> Result<()> {
        let now = now()?;
        self.revoked.retain(|_, exp| *exp > now);
        Ok(())
    }
}

fn now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| GatewayError::internal(format!("System time error: {}", e)))
}
