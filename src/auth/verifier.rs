use actix_web::{HttpResponse, http::StatusCode};
use anyhow::Context;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

/// Resolved caller identity, derived from verified token claims. This value
/// is the only authorization anchor the engine ever sees.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing or invalid authorization header")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("No verification key matches the token")]
    UnknownKey,
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(serde_json::json!({
            "kind": "unauthorized",
            "error": self.to_string(),
        }))
    }
}

/// OIDC claims we care about. Expiry/audience/issuer checks run against the
/// raw token during decode; this struct only carries what becomes the
/// [`Identity`].
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kty: String,
    #[serde(default)]
    kid: Option<String>,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

/// Verifies bearer tokens against either a JWKS document (RS256, fetched
/// once at startup) or a shared secret (HS256, development).
pub struct TokenVerifier {
    keys: Vec<(Option<String>, DecodingKey)>,
    validation: Validation,
}

impl TokenVerifier {
    /// Build from environment config. Fails fast when neither JWKS_URL nor
    /// JWT_SECRET is configured: running unauthenticated is not an option
    /// for a service whose whole contract is identity-scoped data.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (keys, algorithm) = if let Some(jwks_url) = &config.jwks_url {
            let jwks: JwksDocument = reqwest::get(jwks_url)
                .await
                .context("Failed to fetch JWKS document")?
                .json()
                .await
                .context("Failed to parse JWKS document")?;

            let mut keys = Vec::new();
            for jwk in jwks.keys {
                if jwk.kty != "RSA" {
                    continue;
                }
                let (Some(n), Some(e)) = (&jwk.n, &jwk.e) else {
                    continue;
                };
                let key = DecodingKey::from_rsa_components(n, e)
                    .context("Invalid RSA components in JWKS")?;
                keys.push((jwk.kid, key));
            }
            anyhow::ensure!(!keys.is_empty(), "JWKS document contains no usable RSA keys");
            tracing::info!(key_count = keys.len(), "Loaded JWKS verification keys");
            (keys, Algorithm::RS256)
        } else if let Some(secret) = &config.jwt_secret {
            tracing::warn!("Using HS256 shared-secret token verification (development mode)");
            (
                vec![(None, DecodingKey::from_secret(secret.as_bytes()))],
                Algorithm::HS256,
            )
        } else {
            anyhow::bail!("Set JWKS_URL (with OAUTH_ISSUER/OAUTH_AUDIENCE) or JWT_SECRET");
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_aud = config.oauth_audience.is_some();
        if let Some(audience) = &config.oauth_audience {
            validation.set_audience(&[audience]);
        }
        if let Some(issuer) = &config.oauth_issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { keys, validation })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let kid = decode_header(token)
            .map_err(AuthError::InvalidToken)?
            .kid;

        // Prefer the key the header names; otherwise try them all.
        let candidates: Vec<&DecodingKey> = match &kid {
            Some(kid) => self
                .keys
                .iter()
                .filter(|(k, _)| k.as_deref() == Some(kid.as_str()))
                .map(|(_, key)| key)
                .collect(),
            None => self.keys.iter().map(|(_, key)| key).collect(),
        };

        if candidates.is_empty() {
            return Err(AuthError::UnknownKey);
        }

        let mut last_err = None;
        for key in candidates {
            match decode::<Claims>(token, key, &self.validation) {
                Ok(data) => return Ok(identity_from_claims(data.claims)),
                Err(e) => last_err = Some(e),
            }
        }

        Err(match last_err {
            Some(e) => AuthError::InvalidToken(e),
            None => AuthError::UnknownKey,
        })
    }

    /// Strip the `Bearer ` prefix from an Authorization header value and
    /// verify the remainder.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;
        self.verify(token)
    }
}

fn identity_from_claims(claims: Claims) -> Identity {
    let email = claims
        .email
        .or(claims.preferred_username)
        .unwrap_or_default();
    Identity {
        subject: claims.sub,
        email,
        first_name: claims.given_name.unwrap_or_default(),
        last_name: claims.family_name.unwrap_or_default(),
    }
}
