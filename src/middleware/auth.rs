use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

/// Bearer token claims. `sub` is the employee id that submissions and
/// competency records are keyed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        let role = self.role.as_deref().unwrap_or_default();
        allowed.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

const ADMIN_ROLES: [&str; 2] = ["admin", "hr"];

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Claims, Response> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(reject(StatusCode::UNAUTHORIZED, "missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(reject(StatusCode::UNAUTHORIZED, "bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(reject(StatusCode::UNAUTHORIZED, "unsupported_scheme"));
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) if !data.claims.sub.trim().is_empty() => Ok(data.claims),
        Ok(_) => Err(reject(StatusCode::UNAUTHORIZED, "invalid_token")),
        Err(e) => {
            tracing::warn!(error = %e, "rejected bearer token");
            Err(reject(StatusCode::UNAUTHORIZED, "invalid_token"))
        }
    }
}

pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(req.headers(), &state.config.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

pub async fn require_hr_or_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(req.headers(), &state.config.jwt_secret) {
        Ok(claims) => {
            if !claims.has_any_role(&ADMIN_ROLES) {
                tracing::warn!(sub = %claims.sub, role = ?claims.role, "admin route refused");
                return reject(StatusCode::FORBIDDEN, "forbidden");
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

/// Signs an HS256 token for `sub`, valid for `ttl`.
pub fn issue_token(
    secret: &str,
    sub: &str,
    role: Option<&str>,
    ttl: chrono::Duration,
) -> crate::error::Result<String> {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (chrono::Utc::now() + ttl).timestamp().max(0) as usize,
        role: role.map(str::to_string),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| crate::error::Error::Internal(format!("Failed to sign token: {}", e)))
}
