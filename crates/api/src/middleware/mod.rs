//! HTTP middleware components.

pub mod agent_auth;
pub mod logging;
pub mod security_headers;
pub mod trace_id;

#[allow(unused_imports)] // Re-exports for downstream use
pub use agent_auth::{require_agent_auth, AgentAuth};
#[allow(unused_imports)] // Re-exports for downstream use
pub use security_headers::security_headers_middleware;
#[allow(unused_imports)] // Re-exports for downstream use
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
