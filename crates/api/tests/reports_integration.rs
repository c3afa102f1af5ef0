//! Integration tests for the work report endpoints.
//!
//! The router runs against an in-memory store; JWTs are minted with the
//! test RSA key pair.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use uuid::Uuid;

use common::{
    assert_error_body, auth_token, create_test_app, entry, get_unauthenticated, get_with_auth,
    parse_body, FailingWorkEntryStore, MemoryWorkEntryStore,
};
use domain::models::WorkEntry;

fn fixture_agents() -> (Uuid, Uuid) {
    (
        "11111111-1111-1111-1111-111111111111".parse().unwrap(),
        "22222222-2222-2222-2222-222222222222".parse().unwrap(),
    )
}

/// Entries for two agents across the ISO week 2026-W07 (Feb 9 - Feb 15).
fn fixture_entries() -> Vec<WorkEntry> {
    let (alice, bob) = fixture_agents();
    vec![
        entry(1, alice, "Alice", "2026-02-09", "09:00:00", "11:00:00", "Onsite installation"),
        entry(2, alice, "Alice", "2026-02-09", "10:00:00", "12:00:00", "Cabling"),
        entry(3, alice, "Alice", "2026-02-10", "08:00:00", "08:30:00", "Ticket triage"),
        entry(4, bob, "Bob", "2026-02-09", "13:00:00", "15:00:00", "Remote support"),
        entry(5, bob, "Bob", "2026-02-12", "09:00:00", "17:00:00", "Store visit"),
        // Outside the week
        entry(6, alice, "Alice", "2026-02-16", "09:00:00", "10:00:00", "Planning"),
    ]
}

fn app_with_fixtures() -> axum::Router {
    create_test_app(Arc::new(MemoryWorkEntryStore::new(fixture_entries())))
}

// ===========================================
// Authentication
// ===========================================

#[tokio::test]
async fn test_list_requires_auth() {
    let app = app_with_fixtures();
    let response = get_unauthenticated(app, "/api/v1/reports/work-entries?date=2026-02-09").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_summary_requires_auth() {
    let app = app_with_fixtures();
    let response = get_unauthenticated(app, "/api/v1/reports/work-summary?date=2026-02-09").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = app_with_fixtures();
    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?date=2026-02-09",
        "not.a.jwt",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ===========================================
// Listing
// ===========================================

#[tokio::test]
async fn test_admin_lists_day_entries_for_all_agents() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(app, "/api/v1/reports/work-entries?date=2026-02-09", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 50);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    // Default sort: date asc, then start asc, id breaks ties
    assert_eq!(body["items"][0]["id"], 1);
    assert_eq!(body["items"][1]["id"], 2);
    assert_eq!(body["items"][2]["id"], 4);
    // Admin without an agent filter sees everyone
    assert!(body["filters"]["agentIds"].is_null());
    assert_eq!(body["filters"]["scope"], "day");
}

#[tokio::test]
async fn test_user_sees_only_own_entries() {
    let (alice, _) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    let response = get_with_auth(app, "/api/v1/reports/work-entries?date=2026-02-09", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["total"], 2);
    for item in body["items"].as_array().unwrap() {
        assert_eq!(item["agentId"], alice.to_string());
    }
    assert_eq!(
        body["filters"]["agentIds"],
        serde_json::json!([alice.to_string()])
    );
}

#[tokio::test]
async fn test_user_cannot_query_foreign_agent() {
    let (alice, bob) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    let uri = format!("/api/v1/reports/work-entries?date=2026-02-09&agentId={}", bob);
    let response = get_with_auth(app, &uri, &token).await;
    let code = assert_error_body(response, StatusCode::FORBIDDEN).await;
    assert_eq!(code, "forbidden");
}

#[tokio::test]
async fn test_user_cannot_smuggle_foreign_agent_into_list() {
    let (alice, bob) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    let uri = format!(
        "/api/v1/reports/work-entries?date=2026-02-09&agentIds={},{}",
        alice, bob
    );
    let response = get_with_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_editor_queries_foreign_agent() {
    let (alice, bob) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "EDITOR");

    let uri = format!("/api/v1/reports/work-entries?date=2026-02-09&agentId={}", bob);
    let response = get_with_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["agentId"], bob.to_string());
}

#[tokio::test]
async fn test_admin_filters_by_agent_id_list() {
    let (alice, bob) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let uri = format!(
        "/api/v1/reports/work-entries?from=2026-02-09&to=2026-02-15&agentIds={},{}",
        alice, bob
    );
    let response = get_with_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["total"], 5);
    assert_eq!(
        body["filters"]["agentIds"],
        serde_json::json!([alice.to_string(), bob.to_string()])
    );
}

#[tokio::test]
async fn test_free_text_search_is_case_insensitive() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?from=2026-02-09&to=2026-02-15&q=STORE",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["action"], "Store visit");
    assert_eq!(body["filters"]["q"], "STORE");
}

#[tokio::test]
async fn test_sort_by_date_desc() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?from=2026-02-09&to=2026-02-15&sort=date:desc,start:asc",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let dates: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["workDate"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2026-02-12", "2026-02-10", "2026-02-09", "2026-02-09", "2026-02-09"]
    );
}

// ===========================================
// Paging
// ===========================================

#[tokio::test]
async fn test_page_size_clamped_to_max() {
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    // 300 entries on one day, page size request far above the cap
    let agent = Uuid::new_v4();
    let bulk: Vec<WorkEntry> = (1..=300)
        .map(|id| {
            let action: String = Sentence(1..4).fake();
            entry(id, agent, "Crowd", "2026-03-02", "09:00:00", "10:00:00", &action)
        })
        .collect();
    let app = create_test_app(Arc::new(MemoryWorkEntryStore::new(bulk)));
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?date=2026-03-02&pageSize=5000",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["pageSize"], 200);
    assert_eq!(body["total"], 300);
    assert_eq!(body["items"].as_array().unwrap().len(), 200);
}

#[tokio::test]
async fn test_page_past_end_is_empty_with_total() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?date=2026-02-09&page=9&pageSize=2",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["page"], 9);
}

#[tokio::test]
async fn test_paging_splits_ordered_rows() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?date=2026-02-09&page=2&pageSize=2",
        &token,
    )
    .await;
    let body = parse_body(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["id"], 4);
}

// ===========================================
// Validation
// ===========================================

#[tokio::test]
async fn test_unknown_sort_field_rejected() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?date=2026-02-09&sort=salary:desc",
        &token,
    )
    .await;
    let code = assert_error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "validation_error");
}

#[tokio::test]
async fn test_malformed_week_token_rejected() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(app, "/api/v1/reports/work-entries?weekIso=2026-7", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conflicting_scope_fields_rejected() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?date=2026-02-09&weekIso=2026-W07",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_range_rejected() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(app, "/api/v1/reports/work-entries?from=2026-02-09", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inverted_range_rejected() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-entries?from=2026-02-16&to=2026-02-09",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_scope_fields_rejected() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(app, "/api/v1/reports/work-entries", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_scope_must_match_fields() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-summary?scope=week&date=2026-02-09",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_scope_defaults_to_day() {
    let app = app_with_fixtures();
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    // Without an explicit scope the summary is a day summary, so week
    // fields do not resolve
    let response =
        get_with_auth(app, "/api/v1/reports/work-summary?weekIso=2026-W07", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ===========================================
// Summary
// ===========================================

#[tokio::test]
async fn test_day_summary_merges_overlap() {
    let (alice, _) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    // Alice on Feb 9: 09:00-11:00 and 10:00-12:00
    let response = get_with_auth(app, "/api/v1/reports/work-summary?date=2026-02-09", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["partsCount"], 2);
    assert_eq!(body["recordedMinutes"], 240);
    assert_eq!(body["coveredMinutes"], 180);
    assert_eq!(body["overlapMinutes"], 60);
    assert_eq!(body["mergedIntervals"].as_array().unwrap().len(), 1);
    assert_eq!(body["gaps"].as_array().unwrap().len(), 0);
    // Day scope carries no per-day rollup
    assert!(body.get("byDay").is_none());
}

#[tokio::test]
async fn test_week_summary_resolves_iso_week_window() {
    let (alice, _) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-summary?scope=week&weekIso=2026-W07",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["filters"]["scope"], "week");
    assert_eq!(body["filters"]["startDate"], "2026-02-09");
    assert_eq!(body["filters"]["endDate"], "2026-02-16");

    // Feb 9: 09:00-12:00 merged (180), Feb 10: 30 minutes
    assert_eq!(body["recordedMinutes"], 270);
    assert_eq!(body["coveredMinutes"], 210);
    assert_eq!(body["overlapMinutes"], 60);

    let by_day = body["byDay"].as_array().expect("byDay present for week");
    assert_eq!(by_day.len(), 2);
    assert_eq!(by_day[0]["date"], "2026-02-09");
    assert_eq!(by_day[0]["coveredMinutes"], 180);
    assert_eq!(by_day[0]["overlapMinutes"], 60);
    assert_eq!(by_day[1]["date"], "2026-02-10");
    assert_eq!(by_day[1]["coveredMinutes"], 30);
}

#[tokio::test]
async fn test_range_summary_reports_gaps() {
    let (_, bob) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(bob, "USER");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-summary?scope=range&from=2026-02-09&to=2026-02-13",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    // Bob: Feb 9 13:00-15:00 and Feb 12 09:00-17:00, one gap in between
    assert_eq!(body["partsCount"], 2);
    assert_eq!(body["recordedMinutes"], 600);
    assert_eq!(body["coveredMinutes"], 600);
    assert_eq!(body["overlapMinutes"], 0);
    assert_eq!(body["gaps"].as_array().unwrap().len(), 1);
    assert_eq!(body["byDay"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_week_summary_is_zeroed() {
    let (alice, _) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    let response = get_with_auth(
        app,
        "/api/v1/reports/work-summary?scope=week&weekIso=2026-W20",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["partsCount"], 0);
    assert_eq!(body["recordedMinutes"], 0);
    assert_eq!(body["coveredMinutes"], 0);
    assert_eq!(body["overlapMinutes"], 0);
    assert!(body["firstStart"].is_null());
    assert!(body["lastEnd"].is_null());
    // Rollup list is present but empty for a week with no entries
    assert_eq!(body["byDay"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_user_summary_excludes_foreign_entries() {
    let (alice, _) = fixture_agents();
    let app = app_with_fixtures();
    let token = auth_token(alice, "USER");

    // Feb 9 has Bob's entry too; a USER summary must not include it
    let response = get_with_auth(app, "/api/v1/reports/work-summary?date=2026-02-09", &token).await;
    let body = parse_body(response).await;
    assert_eq!(body["partsCount"], 2);
    assert_eq!(body["recordedMinutes"], 240);
}

// ===========================================
// Store failures
// ===========================================

#[tokio::test]
async fn test_store_failure_maps_to_internal_error() {
    let app = create_test_app(Arc::new(FailingWorkEntryStore));
    let token = auth_token(Uuid::new_v4(), "ADMIN");

    let response = get_with_auth(app, "/api/v1/reports/work-entries?date=2026-02-09", &token).await;
    let code = assert_error_body(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(code, "internal_error");

    // The backend detail is withheld from the client
    let app = create_test_app(Arc::new(FailingWorkEntryStore));
    let response = get_with_auth(app, "/api/v1/reports/work-summary?date=2026-02-09", &token).await;
    let body = parse_body(response).await;
    assert_eq!(body["message"], "An internal error occurred");
}

// ===========================================
// Health
// ===========================================

#[tokio::test]
async fn test_health_endpoints_are_public() {
    for uri in ["/api/health", "/api/health/ready", "/api/health/live"] {
        let app = app_with_fixtures();
        let response = get_unauthenticated(app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{} should be public", uri);
    }
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = app_with_fixtures();
    let response = get_unauthenticated(app, "/api/health").await;

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(!response.headers().contains_key("strict-transport-security"));
}

#[tokio::test]
async fn test_hsts_header_follows_security_config() {
    let mut config = common::test_config();
    config.security.hsts_enabled = true;
    let app = common::create_test_app_with_config(
        config,
        Arc::new(MemoryWorkEntryStore::new(fixture_entries())),
    );

    let response = get_unauthenticated(app, "/api/health").await;
    assert_eq!(
        response.headers().get("strict-transport-security").unwrap(),
        "max-age=31536000; includeSubDomains"
    );
}
