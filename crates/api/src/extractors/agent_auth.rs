//! Agent JWT authentication extractor.
//!
//! Provides an Axum extractor for validating JWT tokens from requests.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::agent_auth::AgentAuth as AgentAuthData;
use domain::models::Role;

/// Authenticated agent information from JWT.
///
/// This extractor validates the Bearer token in the Authorization header
/// and provides access to the authenticated agent's details.
#[derive(Debug, Clone)]
pub struct AgentAuth {
    /// Agent ID from the JWT subject claim.
    pub agent_id: Uuid,
    /// Caller role resolved from the role claim.
    pub role: Role,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl From<AgentAuthData> for AgentAuth {
    fn from(data: AgentAuthData) -> Self {
        Self {
            agent_id: data.agent_id,
            role: data.role,
            jti: data.jti,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AgentAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // First, check if auth info was already inserted by middleware
        if let Some(auth) = parts.extensions.get::<AgentAuthData>() {
            return Ok(auth.clone().into());
        }

        // Otherwise, extract and validate the token directly
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let jwt_config =
            AgentAuthData::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let auth_data = AgentAuthData::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth_data.into())
    }
}
