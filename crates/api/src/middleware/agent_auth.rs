//! Agent JWT authentication middleware.
//!
//! Validates Bearer tokens and resolves the caller's role before any
//! report handler runs.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use domain::models::Role;
use shared::jwt::{self, JwtConfig};

/// Authenticated agent information extracted from JWT.
#[derive(Debug, Clone)]
pub struct AgentAuth {
    /// Agent ID from the JWT subject claim.
    pub agent_id: Uuid,
    /// Caller role resolved from the role claim.
    pub role: Role,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl AgentAuth {
    /// Validates an access token and returns agent authentication info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let agent_id =
            jwt::extract_agent_id(&claims).map_err(|_| "Invalid agent ID in token".to_string())?;

        let role = Role::from_claim(&claims.role)
            .ok_or_else(|| format!("Unknown role in token: {}", claims.role))?;

        Ok(AgentAuth {
            agent_id,
            role,
            jti: claims.jti,
        })
    }

    /// Creates a JwtConfig from JwtAuthConfig.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::with_leeway(
            &config.private_key,
            &config.public_key,
            config.access_token_expiry_secs,
            config.leeway_secs,
        )
        .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }
}

/// Middleware that requires JWT agent authentication.
///
/// Validates the Bearer token in the Authorization header and rejects
/// requests without a valid JWT. Authenticated agent information is
/// stored in request extensions for use by downstream handlers.
pub async fn require_agent_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    // Create JWT config
    let jwt_config = match AgentAuth::create_jwt_config(&state.config.jwt) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to create JWT config: {}", e);
            return internal_error_response("Authentication service unavailable");
        }
    };

    // Validate the token
    match AgentAuth::validate(&jwt_config, token) {
        Ok(auth) => {
            // Store authentication info in request extensions
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Helper to create internal error response.
fn internal_error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}
