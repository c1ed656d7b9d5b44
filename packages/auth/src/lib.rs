// ABOUTME: Bearer-token verification for TaskGen
// ABOUTME: Exchanges a presented token for a verified user identifier

pub mod error;

pub use error::AuthError;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// A verified request identity. Every resource operation is scoped to this
/// id; it is threaded into handlers explicitly, never stored ambiently.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

/// The authentication gate's consumed contract: a bearer token in, a
/// verified user id out, or a rejection. The verification algorithm itself
/// is an implementation detail behind this trait.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError>;
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// HS256 JWT verification against the identity provider's shared secret.
/// Expiry and audience are enforced; the `sub` claim becomes the user id.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(AuthUser {
            id: data.claims.sub,
        })
    }
}
