//! services/api/src/web/session.rs
//!
//! Cookie-based session middleware.
//!
//! The cookie carries `<session-id>.<hex HMAC-SHA256 of the id>`. Every request
//! ends up with a session: when the cookie is missing, badly signed, or names
//! a session the store no longer knows, a fresh empty session is stored right
//! away and its cookie is sent back with the response.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use food_api_core::domain::SessionData;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::{Config, ConfigError};
use crate::web::state::AppState;

type HmacSha256 = Hmac<Sha256>;

//=========================================================================================
// Cookie Signing
//=========================================================================================

/// Signs and verifies session ids with a key derived from the session secret.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| ConfigError::InvalidValue("SESSION_SECRET".to_string(), e.to_string()))?;
        Ok(Self { mac })
    }

    /// Produces the cookie value for a session id.
    pub fn sign(&self, session_id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(session_id.as_bytes());
        format!("{}.{}", session_id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the session id if the cookie value carries a valid signature.
    pub fn unsign<'a>(&self, value: &'a str) -> Option<&'a str> {
        let (session_id, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac.clone();
        mac.update(session_id.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(session_id)
    }
}

//=========================================================================================
// Cookie Headers
//=========================================================================================

/// Finds the value of the named cookie in the request's `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|h| h.split(';'))
        .find_map(|c| c.trim().strip_prefix(name)?.strip_prefix('='))
}

/// The `Set-Cookie` value that hands a session to the client.
pub fn session_cookie(config: &Config, value: &str) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        config.session_cookie_name, value
    );
    if let Some(ttl) = config.session_ttl {
        cookie.push_str(&format!("; Max-Age={}", ttl.as_secs()));
    }
    if config.session_cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The `Set-Cookie` value that makes the client forget its session.
pub fn expired_session_cookie(config: &Config) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.session_cookie_name
    );
    if config.session_cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

//=========================================================================================
// Middleware
//=========================================================================================

/// The session resolved for the current request, available to handlers
/// through `Extension<SessionContext>`.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub id: String,
    pub data: SessionData,
}

/// Middleware that attaches a session to every request.
pub async fn session_layer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Resolve the signed session id from the cookie, if any
    let session_id = cookie_value(req.headers(), &state.config.session_cookie_name)
        .and_then(|value| state.signer.unsign(value))
        .map(str::to_string);

    // 2. Load the session, or start a new one
    let existing = match session_id {
        Some(id) => {
            let data = state.sessions.get(&id).await.map_err(|e| {
                error!("Failed to load session: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            data.map(|data| SessionContext { id, data })
        }
        None => None,
    };

    let (context, is_new) = match existing {
        Some(context) => (context, false),
        None => {
            let id = Uuid::new_v4().to_string();
            state
                .sessions
                .set(&id, SessionData::default())
                .await
                .map_err(|e| {
                    error!("Failed to create session: {:?}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;
            debug!(session_id = %id, "New session created");
            (
                SessionContext {
                    id,
                    data: SessionData::default(),
                },
                true,
            )
        }
    };

    let new_cookie = is_new.then(|| session_cookie(&state.config, &state.signer.sign(&context.id)));

    // 3. Hand the session to the handler
    req.extensions_mut().insert(context);
    let mut response = next.run(req).await;

    // 4. Issue the cookie for a new session, unless the handler already set one
    if let Some(cookie) = new_cookie {
        if !response.headers().contains_key(header::SET_COOKIE) {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(e) => error!("Failed to encode session cookie: {:?}", e),
            }
        }
    }

    Ok(response)
}
