//! HTTP-level integration tests for `/api/v1/notifications`.
//!
//! Channel senders are replaced by in-memory fakes, so these tests cover the
//! request boundary and the dispatcher together without external providers.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use bhv360_api::handlers::notification::MAX_BULK_NOTIFICATIONS;
use bhv360_core::channels::Channel;
use common::{body_json, build_test_app, dispatcher_with, post_json, post_raw, FakeSender};
use serde_json::json;

// ---------------------------------------------------------------------------
// POST /notifications/send
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_push_success() {
    let push = FakeSender::ok(Channel::Push);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({
            "userId": "u1",
            "title": "Brand",
            "body": "Ontruim pand",
            "channels": ["push"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["notificationId"].as_str().unwrap().starts_with("notif_"));
    assert_eq!(json["results"], json!([{ "channel": "push", "success": true }]));
    assert_eq!(push.call_count(), 1);
}

#[tokio::test]
async fn send_push_failure_is_reported_per_channel() {
    let push = FakeSender::failing_on(Channel::Push, &["Brand"]);
    let app = build_test_app(dispatcher_with(vec![push]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({
            "userId": "u1",
            "title": "Brand",
            "body": "Ontruim pand",
            "channels": ["push"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["results"][0]["channel"], "push");
    assert_eq!(json["results"][0]["success"], false);
    assert_eq!(
        json["results"][0]["error"],
        "push provider rejected the message"
    );
}

#[tokio::test]
async fn send_with_one_failing_channel_still_attempts_the_other() {
    let push = FakeSender::failing_on(Channel::Push, &["Brand"]);
    let email = FakeSender::ok(Channel::Email);
    let app = build_test_app(dispatcher_with(vec![push.clone(), email.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({
            "userId": "u1",
            "title": "Brand",
            "body": "Ontruim pand",
            "channels": ["push", "email"],
            "data": { "email": "ploeg@example.nl" }
        }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["results"][0]["success"], false);
    assert_eq!(json["results"][1], json!({ "channel": "email", "success": true }));
    assert_eq!(push.call_count(), 1);
    assert_eq!(email.call_count(), 1);
}

#[tokio::test]
async fn send_without_channels_uses_defaults() {
    let push = FakeSender::ok(Channel::Push);
    let email = FakeSender::ok(Channel::Email);
    let app = build_test_app(dispatcher_with(vec![push.clone(), email.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({ "userId": "u1", "title": "Oefening", "body": "Morgen 10:00" }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["results"], json!([{ "channel": "push", "success": true }]));
    assert_eq!(email.call_count(), 0);
}

#[tokio::test]
async fn send_to_unconfigured_channel_fails_that_channel() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({ "userId": "u1", "title": "Brand", "body": "x", "channels": ["email"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["results"][0]["error"],
        "No sender configured for channel email"
    );
}

#[tokio::test]
async fn send_missing_fields_is_rejected_before_dispatch() {
    let push = FakeSender::ok(Channel::Push);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({ "userId": "u1", "title": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Missing required fields: title, body");
    assert_eq!(push.call_count(), 0);
}

#[tokio::test]
async fn send_unknown_channel_is_bad_request() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({ "userId": "u1", "title": "t", "body": "b", "channels": ["sms"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn send_unknown_field_is_bad_request() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({ "userId": "u1", "title": "t", "body": "b", "recipient": "all" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn send_unknown_priority_is_bad_request() {
    let push = FakeSender::ok(Channel::Push);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({ "userId": "u1", "title": "t", "body": "b", "priority": "critical" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("critical"));
    assert_eq!(push.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn send_to_hanging_provider_reports_timeout_not_408() {
    let push = FakeSender::hanging(Channel::Push);
    let email = FakeSender::ok(Channel::Email);
    let app = build_test_app(dispatcher_with(vec![push, email]));

    let response = post_json(
        app,
        "/api/v1/notifications/send",
        json!({
            "userId": "u1",
            "title": "Brand",
            "body": "Ontruim pand",
            "channels": ["push", "email"],
            "data": { "email": "ploeg@example.nl" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["results"],
        json!([
            { "channel": "push", "success": false, "error": "push delivery timed out after 20s" },
            { "channel": "email", "success": true }
        ])
    );
}

#[tokio::test]
async fn send_malformed_json_is_bad_request() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_raw(app, "/api/v1/notifications/send", "{\"userId\":".into()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// POST /notifications/bulk
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bulk_isolates_a_failing_payload() {
    let push = FakeSender::failing_on(Channel::Push, &["Tweede"]);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/bulk",
        json!({
            "notifications": [
                { "userId": "u1", "title": "Eerste", "body": "a" },
                { "userId": "u2", "title": "Tweede", "body": "b" },
                { "userId": "u3", "title": "Derde", "body": "c" }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["count"], 3);

    let ids: Vec<&str> = json["notificationIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 3);

    // All three were attempted despite the failure in the middle.
    assert_eq!(push.call_count(), 3);
}

#[tokio::test]
async fn bulk_all_delivered_is_success() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_json(
        app,
        "/api/v1/notifications/bulk",
        json!({
            "notifications": [
                { "userId": "u1", "title": "Oefening", "body": "a" },
                { "userId": "u2", "title": "Oefening", "body": "a" }
            ]
        }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
}

#[tokio::test]
async fn bulk_empty_is_bad_request() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_json(app, "/api/v1/notifications/bulk", json!({ "notifications": [] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "notifications must be a non-empty array"
    );
}

#[tokio::test]
async fn bulk_invalid_entry_rejects_whole_batch() {
    let push = FakeSender::ok(Channel::Push);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let response = post_json(
        app,
        "/api/v1/notifications/bulk",
        json!({
            "notifications": [
                { "userId": "u1", "title": "Brand", "body": "a" },
                { "userId": "", "title": "Brand", "body": "b" }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "notifications[1]: Missing required fields: userId"
    );
    assert_eq!(push.call_count(), 0);
}

#[tokio::test]
async fn bulk_over_limit_is_rejected_before_dispatch() {
    let push = FakeSender::ok(Channel::Push);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let entries: Vec<_> = (0..=MAX_BULK_NOTIFICATIONS)
        .map(|i| json!({ "userId": format!("u{i}"), "title": "Oefening", "body": "a" }))
        .collect();
    let response = post_json(
        app,
        "/api/v1/notifications/bulk",
        json!({ "notifications": entries }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "At most 500 notifications per bulk request");
    assert_eq!(push.call_count(), 0);
}

#[tokio::test]
async fn bulk_at_limit_is_accepted() {
    let push = FakeSender::ok(Channel::Push);
    let app = build_test_app(dispatcher_with(vec![push.clone()]));

    let entries: Vec<_> = (0..MAX_BULK_NOTIFICATIONS)
        .map(|i| json!({ "userId": format!("u{i}"), "title": "Oefening", "body": "a" }))
        .collect();
    let response = post_json(
        app,
        "/api/v1/notifications/bulk",
        json!({ "notifications": entries }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], MAX_BULK_NOTIFICATIONS);
    assert_eq!(push.call_count(), MAX_BULK_NOTIFICATIONS);
}

#[tokio::test]
async fn bulk_missing_array_is_bad_request() {
    let app = build_test_app(dispatcher_with(vec![FakeSender::ok(Channel::Push)]));

    let response = post_json(app, "/api/v1/notifications/bulk", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
