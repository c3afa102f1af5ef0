//! Access guard: maps caller role and requested agent filters to the
//! authorized agent set.
//!
//! This is the only place that branches on roles. Downstream code works
//! with the resulting [`AgentScope`] and stays role-agnostic.

use uuid::Uuid;

use crate::error::ReportError;
use crate::models::report::AgentScope;
use crate::models::role::Role;

/// Resolves the authorized agent set for a report request.
///
/// `agent_id` and `agent_ids` come straight from the query string; their
/// union is the requested set. A `USER` caller may only request themselves
/// (or nothing, which means themselves); elevated roles get the requested
/// set, or everything when no filter was supplied.
pub fn resolve_agent_scope(
    caller_id: Uuid,
    role: Role,
    agent_id: Option<Uuid>,
    agent_ids: Option<&str>,
) -> Result<AgentScope, ReportError> {
    let mut requested: Vec<Uuid> = Vec::new();
    if let Some(id) = agent_id {
        requested.push(id);
    }
    if let Some(list) = agent_ids {
        let parsed = shared::validation::parse_agent_id_list(list).ok_or_else(|| {
            ReportError::Validation(
                "agentIds must be a comma-separated list of UUIDs".to_string(),
            )
        })?;
        requested.extend(parsed);
    }
    // Union, order-preserving.
    let mut deduped: Vec<Uuid> = Vec::with_capacity(requested.len());
    for id in requested {
        if !deduped.contains(&id) {
            deduped.push(id);
        }
    }
    let requested = deduped;

    if role.is_elevated() {
        if requested.is_empty() {
            Ok(AgentScope::All)
        } else {
            Ok(AgentScope::AnyOf(requested))
        }
    } else {
        // Base role: any explicit filter must name exactly the caller.
        if requested.iter().any(|id| *id != caller_id) {
            tracing::warn!(
                caller = %caller_id,
                "base-role caller requested another agent's work entries"
            );
            return Err(ReportError::Forbidden(
                "You may only query your own work entries".to_string(),
            ));
        }
        Ok(AgentScope::AnyOf(vec![caller_id]))
    }
}
