use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use models_hotel::user::UserContext;
use uuid::Uuid;

use crate::error::AuthError;

/// The claims the identity provider puts in an access token. Exhaustively
/// typed so a provider-side shape change fails verification instead of
/// silently producing empty fields.
#[derive(serde::Serialize, serde::Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct AccessClaims {
    /// Subject: the provider's id for the user, shared with the users table.
    pub sub: String,
    /// The audience of the token.
    pub aud: String,
    /// The issuer of the token.
    pub iss: String,
    /// Expiration time, seconds since the epoch.
    pub exp: usize,
    /// The email of the user.
    pub email: String,
}

impl TryFrom<AccessClaims> for UserContext {
    type Error = AuthError;

    fn try_from(claims: AccessClaims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)?;
        Ok(UserContext {
            user_id,
            email: claims.email,
        })
    }
}

/// Verifies HS256 access tokens against the configured audience and issuer.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, audience: &str, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.set_issuer(&[issuer]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::JwtExpired,
                _ => AuthError::JwtValidationFailed {
                    details: err.to_string(),
                },
            })
    }
}
