use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

use crate::auth::verifier::{Identity, TokenVerifier};

/// Authenticated caller, resolved from the bearer token by the REST adapter.
///
/// The raw token is kept alongside the identity so the chat orchestrator can
/// forward it to the MCP server; the engine itself only ever receives
/// `identity`.
pub struct AuthUser {
    pub identity: Identity,
    pub token: String,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t.to_string(),
            None => {
                return ready(Err(ErrorUnauthorized(
                    serde_json::json!({"kind": "unauthorized", "error": "Missing token"}),
                )));
            }
        };

        let verifier = match req.app_data::<Data<TokenVerifier>>() {
            Some(v) => v,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Token verifier missing",
                )));
            }
        };

        match verifier.verify(&token) {
            Ok(identity) => ready(Ok(AuthUser { identity, token })),
            Err(e) => ready(Err(ErrorUnauthorized(
                serde_json::json!({"kind": "unauthorized", "error": e.to_string()}),
            ))),
        }
    }
}
