// SPDX-License-Identifier: Apache-2.0

use linesight_model::parse_instant;
use linesight_query::{QueryLimits, QueryService};
use linesight_server::{build_router, AppState, ServerConfig};
use linesight_store::fixtures::{seed_dataset, FIXTURE_ANCHOR};
use linesight_store::MemoryStore;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn start_server(config: ServerConfig) -> SocketAddr {
    let anchor = parse_instant(FIXTURE_ANCHOR).expect("anchor");
    let store = MemoryStore::from_dataset(seed_dataset(anchor)).expect("seed store");
    let limits = QueryLimits::default().with_page_size(config.page_size);
    let service = QueryService::new(Arc::new(store), limits);
    let app = build_router(AppState::new(service, config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (name, value) in headers {
        req.push_str(&format!("{name}: {value}\r\n"));
    }
    if method == "POST" {
        req.push_str(&format!(
            "Content-Type: application/json\r\nContent-Length: {}\r\n",
            body.len()
        ));
    }
    req.push_str("\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    stream.write_all(body).await.expect("write body");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

async fn get_json(addr: SocketAddr, path: &str, headers: &[(&str, &str)]) -> (u16, Value) {
    let (status, _, body) = send_raw(addr, "GET", path, headers, b"").await;
    (status, serde_json::from_str(&body).expect("json body"))
}

fn label_report(station: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "serial": "AC25W42-L1-00125",
        "workOrder": "WO-10001",
        "station": station,
        "line": "L1",
        "model": "HVAC-X100",
        "modelVersion": "label-v2.1.0",
        "capturedAt": "2026-03-10T11:58:00Z",
        "result": "NG",
        "ngCode": "LBL_MISSING",
        "severity": "major",
        "confidence": 0.88,
        "cycleTimeSec": 18.5,
        "imageUri": "/images/label-ng-00125.jpg",
        "features": {
            "station": "LabelOCR",
            "data": {
                "hasLabel": false,
                "rotationDeg": 0.0,
                "ocrText": "",
                "mesMatch": false,
                "printQualityScore": 0.0
            }
        }
    }))
    .expect("encode report")
}

#[tokio::test]
async fn healthz_reports_ok_with_request_id() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, head, body) = send_raw(addr, "GET", "/healthz", &[], b"").await;
    assert_eq!(status, 200);
    assert_eq!(
        serde_json::from_str::<Value>(&body).expect("json"),
        json!({"status": "ok"})
    );
    assert!(head.to_ascii_lowercase().contains("x-request-id: req-"), "{head}");

    let (_, head, _) =
        send_raw(addr, "GET", "/healthz", &[("x-request-id", "trace-42")], b"").await;
    assert!(head.to_ascii_lowercase().contains("x-request-id: trace-42"), "{head}");
}

#[tokio::test]
async fn overview_routes_serve_fixture_aggregates() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, body) = get_json(addr, "/api/summary?line=L1", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["ok"], 3);
    assert_eq!(body["data"]["ng"], 3);
    assert_eq!(body["data"]["total"], 6);

    let (status, body) = get_json(addr, "/api/ng-pareto?line=L2", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], json!([]));

    let (status, body) = get_json(addr, "/api/trend?line=L1", &[]).await;
    assert_eq!(status, 200);
    assert!(!body["data"].as_array().expect("trend rows").is_empty());
}

#[tokio::test]
async fn listing_paginates_with_configured_page_size() {
    let config = ServerConfig {
        page_size: 2,
        ..ServerConfig::default()
    };
    let addr = start_server(config).await;
    let (status, first) = get_json(addr, "/api/inspections?from=2026-03-10T09:48:00Z", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(first["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(first["data"][0]["id"], "insp-10009");
    let cursor = first["nextCursor"].as_str().expect("cursor").to_string();

    let path = format!("/api/inspections?from=2026-03-10T09:48:00Z&cursor={cursor}");
    let (_, second) = get_json(addr, &path, &[]).await;
    assert_eq!(second["data"][0]["id"], "insp-10007");
}

#[tokio::test]
async fn lookups_distinguish_missing_records() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, body) = get_json(addr, "/api/inspections/insp-10002", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["ngCode"], "LBL_MISREAD");

    let (status, body) = get_json(addr, "/api/inspections/insp-99999", &[]).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "InspectionNotFound");

    let (status, body) = get_json(addr, "/api/units/AC25W42-L1-00123", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["route"].as_array().map(Vec::len), Some(3));

    let (status, body) = get_json(addr, "/api/units/AC25W42-L9-00001", &[]).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "UnitNotFound");
}

#[tokio::test]
async fn invalid_query_parameters_are_rejected() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, body) = get_json(addr, "/api/summary?station=Paint&limit=5", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "InvalidQueryParameter");
    assert_eq!(
        body["error"]["details"]["field_errors"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn model_metrics_are_role_gated() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, body) = get_json(addr, "/api/model-metrics", &[]).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"]["code"], "Forbidden");

    let (status, body) = get_json(
        addr,
        "/api/model-metrics?station=LabelOCR",
        &[("x-linesight-role", "qa_engineer")],
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["data"]["metrics"].is_array());
    assert!(body["data"]["deployments"].is_array());

    let (status, _) = get_json(addr, "/api/summary", &[("x-linesight-role", "intern")]).await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn ingest_publishes_to_live_monitor() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/api/ingest/LabelOCR",
        &[],
        &label_report("LabelOCR"),
    )
    .await;
    assert_eq!(status, 200, "{body}");
    let ack: Value = serde_json::from_str(&body).expect("ack");
    assert_eq!(ack, json!({"ok": true, "id": "insp-10010"}));

    let (status, live) = get_json(addr, "/api/live-monitor", &[]).await;
    assert_eq!(status, 200);
    let ticker = live["data"]["ticker"].as_array().expect("ticker");
    assert_eq!(
        ticker.last().map(|t| t["id"].clone()),
        Some(json!("ng-insp-10010"))
    );
    let thumbs = live["data"]["recentThumbnails"].as_array().expect("thumbs");
    assert_eq!(
        thumbs.last().map(|t| t["imageUri"].clone()),
        Some(json!("/images/label-ng-00125.jpg"))
    );
}

#[tokio::test]
async fn ingest_rejects_mismatched_and_malformed_reports() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/api/ingest/ScrewCheck",
        &[],
        &label_report("LabelOCR"),
    )
    .await;
    assert_eq!(status, 400);
    let body: Value = serde_json::from_str(&body).expect("error body");
    assert_eq!(body["error"]["code"], "StationMismatch");

    let (status, _, body) = send_raw(addr, "POST", "/api/ingest/LabelOCR", &[], b"{oops").await;
    assert_eq!(status, 400);
    let body: Value = serde_json::from_str(&body).expect("error body");
    assert_eq!(body["error"]["code"], "InvalidPayload");
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let config = ServerConfig {
        max_body_bytes: 64,
        ..ServerConfig::default()
    };
    let addr = start_server(config).await;
    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/api/ingest/LabelOCR",
        &[],
        &label_report("LabelOCR"),
    )
    .await;
    assert_eq!(status, 413);
    let body: Value = serde_json::from_str(&body).expect("error body");
    assert_eq!(body["error"]["code"], "PayloadTooLarge");
}

#[tokio::test]
async fn exports_render_csv_and_queue_pdf_jobs() {
    let addr = start_server(ServerConfig::default()).await;
    let (status, head, body) = send_raw(addr, "GET", "/api/export/csv?line=L2", &[], b"").await;
    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("content-type: text/csv"), "{head}");
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("serial,workOrder,station"));
    assert!(lines[1].starts_with("\"AC25W42-L2-00004\""));

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/api/export/pdf",
        &[],
        br#"{"format":"pdf","filters":{"line":"L2"}}"#,
    )
    .await;
    assert_eq!(status, 202);
    let job: Value = serde_json::from_str(&body).expect("job");
    assert_eq!(job["data"]["status"], "queued");
    assert!(job["data"]["jobId"]
        .as_str()
        .is_some_and(|id| id.starts_with("pdf-")));
}
