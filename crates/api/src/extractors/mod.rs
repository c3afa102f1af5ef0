//! Custom Axum extractors.

pub mod agent_auth;

#[allow(unused_imports)] // Re-exports for downstream use
pub use agent_auth::AgentAuth;
