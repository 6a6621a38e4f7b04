mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::{body_json, build_test_app, get_as, post_json_as, send};

#[tokio::test]
async fn test_health_check() {
    let (app, _pool) = build_test_app().await;

    let resp = send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (app, _pool) = build_test_app().await;

    let resp = send(
        &app,
        Request::builder().uri("/api/analytics/summary").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(
        &app,
        Request::builder()
            .uri("/api/analytics/summary")
            .header("authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_session_endpoint() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    let resp = send(&app, get_as(owner, "/api/session")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["data"]["owner_id"], owner.to_string());
    assert_eq!(json["data"]["email"], "trader@example.com");
    assert_eq!(json["data"]["record_count"], 0);
}

#[tokio::test]
async fn test_parse_preview_reports_warnings() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    let resp = send(
        &app,
        post_json_as(owner, "/api/journal/parse", json!({ "trades": "NQ:+50P ~ oops ~ nan" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let entries = json["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["symbol"], "NQ");
    assert_eq!(entries[1]["is_valid"], false);
    assert_eq!(json["data"]["warnings"], json!(["oops"]));
    assert_eq!(json["data"]["labels"], json!(["NQ:+50P", "oops"]));
}

#[tokio::test]
async fn test_create_entries_and_list_history() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    let resp = send(
        &app,
        post_json_as(
            owner,
            "/api/journal/entries",
            json!({ "trade_date": "2025-03-14", "trades": "NQ:+50P ~ ES:-20P ~ BE" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let records = json["data"]["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["week_label"], "Semana 11");
    assert_eq!(records[0]["day_label"], "Viernes");
    assert_eq!(records[2]["is_breakeven"], true);

    let resp = send(&app, get_as(owner, "/api/journal/entries")).await;
    let json = body_json(resp).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let resp = send(&app, get_as(owner, "/api/journal/symbols")).await;
    let json = body_json(resp).await;
    assert_eq!(json["data"], json!(["ES", "NQ"]));
}

#[tokio::test]
async fn test_blank_submission_rejected() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    let resp = send(
        &app,
        post_json_as(owner, "/api/journal/entries", json!({ "trade_date": "2025-03-14", "trades": "   " })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_refreshes_after_insert() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    send(
        &app,
        post_json_as(
            owner,
            "/api/journal/entries",
            json!({ "trade_date": "2025-03-03", "trades": "NQ:+50P ~ ES:-20P" }),
        ),
    )
    .await;

    let json = body_json(send(&app, get_as(owner, "/api/analytics/summary")).await).await;
    assert_eq!(json["data"]["total_points"], "30");
    assert_eq!(json["data"]["wins"], 1);
    assert_eq!(json["data"]["losses"], 1);

    // second read is served from cache; a new insert must invalidate it
    send(
        &app,
        post_json_as(
            owner,
            "/api/journal/entries",
            json!({ "trade_date": "2025-03-04", "trades": "NQ:+10P" }),
        ),
    )
    .await;

    let json = body_json(send(&app, get_as(owner, "/api/analytics/summary")).await).await;
    assert_eq!(json["data"]["total_points"], "40");
    assert_eq!(json["data"]["wins"], 2);
    assert_eq!(json["data"]["equity"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_profit_factor_infinite_renders_symbol() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    send(
        &app,
        post_json_as(owner, "/api/journal/entries", json!({ "trade_date": "2025-01-02", "trades": "+15P" })),
    )
    .await;

    let json = body_json(send(&app, get_as(owner, "/api/analytics/summary")).await).await;
    assert_eq!(json["data"]["profit_factor"], "∞");
}

#[tokio::test]
async fn test_empty_journal_summary() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    let json = body_json(send(&app, get_as(owner, "/api/analytics/summary")).await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["total_trades"], 0);
    assert!(json["data"]["profit_factor"].is_null());
    assert_eq!(json["data"]["max_drawdown"], "0");
}

#[tokio::test]
async fn test_monthly_and_calendar_views() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    for (date, trades) in [
        ("2025-02-27", "NQ:+40P"),
        ("2025-03-03", "NQ:+50P ~ ES:-20P"),
        ("2025-03-04", "BE"),
        ("2025-03-05", "ES:-5P"),
    ] {
        let resp = send(
            &app,
            post_json_as(owner, "/api/journal/entries", json!({ "trade_date": date, "trades": trades })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let json = body_json(send(&app, get_as(owner, "/api/analytics/monthly")).await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["period"], "Febrero 2025");
    assert_eq!(rows[1]["total_points"], "25");
    assert_eq!(rows[1]["trades"], 4);

    let json = body_json(
        send(&app, get_as(owner, "/api/analytics/calendar?year=2025&month=3&symbols=NQ")).await,
    )
    .await;
    let data = &json["data"];
    assert_eq!(data["month_name"], "Marzo");
    // NQ trade plus the symbol-less break-even
    assert_eq!(data["trades"], 2);
    assert_eq!(data["days"]["3"]["total_points"], "50");
    assert_eq!(data["days"]["4"]["trades"], 1);
    assert!(data["days"]["5"].is_null());

    let resp = send(&app, get_as(owner, "/api/analytics/calendar?year=2025&month=13")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owners_do_not_see_each_other() {
    let (app, _pool) = build_test_app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    send(
        &app,
        post_json_as(alice, "/api/journal/entries", json!({ "trade_date": "2025-03-03", "trades": "NQ:+50P" })),
    )
    .await;

    let json = body_json(send(&app, get_as(bob, "/api/journal/entries")).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let json = body_json(send(&app, get_as(bob, "/api/analytics/summary")).await).await;
    assert_eq!(json["data"]["total_trades"], 0);
}

#[tokio::test]
async fn test_csv_export() {
    let (app, _pool) = build_test_app().await;
    let owner = Uuid::new_v4();

    send(
        &app,
        post_json_as(owner, "/api/journal/entries", json!({ "trade_date": "2025-03-03", "trades": "NQ:+50P" })),
    )
    .await;

    let resp = send(&app, get_as(owner, "/api/journal/export.csv")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()["content-type"].to_str().unwrap().starts_with("text/csv"));

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("trade_date,week,day,symbol,value,is_breakeven,raw_text,created_at")
    );
    assert!(lines.next().unwrap().starts_with("2025-03-03,Semana 10,Lunes,NQ,50,false,NQ:+50P,"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _pool) = build_test_app().await;

    let resp = send(&app, Request::builder().uri("/metrics").body(Body::empty()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("journal_submissions_total"));
    assert!(text.contains("metrics_cache_entries"));
}
