use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use kvm_panel::api::{set_silent, ApiError, KvmClient, VmAction};
use kvm_panel::models::{CreateVmRequest, DownloadIsoRequest};

type Log = Arc<Mutex<Vec<String>>>;

async fn list_vms() -> Json<Value> {
    Json(json!([
        {"name": "web01", "uuid": "u-1", "is_active": true, "memory": {"max": 2147483648u64}, "vcpus": 2},
        {"name": "db01", "uuid": "u-2", "is_active": false, "memory": {"max": 1073741824u64, "used": 0}, "vcpus": 1, "state": "shutoff"}
    ]))
}

async fn get_vm(Path(name): Path<String>) -> impl IntoResponse {
    match name.as_str() {
        "broken" => (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").into_response(),
        "ghost" => (StatusCode::NOT_FOUND, Json(json!({"detail": "ВМ не найдена"}))).into_response(),
        _ => Json(json!({"name": name, "uuid": "u", "is_active": false, "memory": {"max": 0}, "vcpus": 1})).into_response(),
    }
}

async fn vm_action(
    State(log): State<Log>,
    Path((name, action)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let force = q.get("force").cloned().unwrap_or_default();
    log.lock().unwrap().push(format!("POST {} {} force={}", name, action, force));
    if name == "busy" {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "ВМ уже запущена"}))).into_response();
    }
    Json(json!({"message": "ok"})).into_response()
}

async fn delete_vm(
    State(log): State<Log>,
    Path(name): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    let disks = q.get("delete_disks").cloned().unwrap_or_default();
    log.lock().unwrap().push(format!("DELETE {} delete_disks={}", name, disks));
    Json(json!({"message": "deleted"}))
}

async fn create_vm(State(log): State<Log>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["memory"].is_null() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "memory"], "msg": "field required"}]})),
        )
            .into_response();
    }
    log.lock().unwrap().push(format!("CREATE {}", body));
    Json(json!({"message": "created"})).into_response()
}

async fn host_stats() -> Json<Value> {
    Json(json!({
        "cpu_percent": 23.45,
        "memory": {"used": 4, "total": 16},
        "disk": {"used": 50, "total": 200},
        "timestamp": "2024-01-15T10:30:00",
        "demo_mode": true
    }))
}

async fn iso_scan() -> Json<Value> {
    Json(json!({"available_isos": [
        {"name": "ubuntu.iso", "path": "/isos/ubuntu.iso", "size": 1024, "modified": "2024-01-15T10:30:00"}
    ]}))
}

async fn iso_rescan(State(log): State<Log>) -> Json<Value> {
    log.lock().unwrap().push("RESCAN".into());
    Json(json!({"available_isos": []}))
}

async fn iso_catalog() -> Json<Value> {
    // Wrong shape: catalog must be a list
    Json(json!({"catalog": "unavailable"}))
}

async fn iso_download(State(log): State<Log>, Json(body): Json<Value>) -> Json<Value> {
    log.lock().unwrap().push(format!("DOWNLOAD {}", body));
    Json(json!({"message": "started"}))
}

async fn iso_delete(State(log): State<Log>, Json(body): Json<Value>) -> Json<Value> {
    log.lock().unwrap().push(format!("DELETE_ISO {}", body["iso_path"]));
    Json(json!({"message": "deleted"}))
}

async fn api_root() -> Json<Value> {
    Json(json!({"name": "KVM Manager API", "version": "1.0.0", "demo_mode": false}))
}

/// Start a mock backend on an ephemeral port; returns its API base URL.
async fn spawn_backend() -> (String, Log) {
    set_silent(true);
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/", get(api_root))
        .route("/vms", get(list_vms).post(create_vm))
        .route("/vms/:name", get(get_vm).delete(delete_vm))
        .route("/vms/:name/:action", post(vm_action))
        .route("/host/stats", get(host_stats))
        .route("/iso/scan", get(iso_scan).post(iso_rescan))
        .route("/iso/catalog", get(iso_catalog))
        .route("/iso/download", post(iso_download))
        .route("/iso/delete", delete(iso_delete))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/", addr), log)
}

#[tokio::test]
async fn test_list_vms_decodes_payload() {
    let (base, _log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();
    let vms = client.list_vms().await.unwrap();
    assert_eq!(vms.len(), 2);
    assert_eq!(vms[0].memory_mb(), 2048);
    assert!(vms[0].is_active);
    assert_eq!(vms[1].state.as_deref(), Some("shutoff"));
}

#[tokio::test]
async fn test_api_info_and_host_stats() {
    let (base, _log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();
    let info = client.api_info().await.unwrap();
    assert_eq!(info.version, "1.0.0");

    let stats = client.host_stats().await.unwrap();
    assert_eq!(stats.cpu_display(), "23.4%");
    assert_eq!(stats.memory_display(), "25.0%");
    assert_eq!(stats.disk_display(), "25.0%");
    assert_eq!(stats.demo_mode, Some(true));
}

#[tokio::test]
async fn test_vm_actions_hit_expected_paths() {
    let (base, log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();
    client.vm_action("web01", VmAction::Start).await.unwrap();
    client.vm_action("web01", VmAction::ForceStop).await.unwrap();
    client.vm_action("my vm", VmAction::Restart).await.unwrap();
    client.delete_vm("db01", true).await.unwrap();

    assert_eq!(
        log.lock().unwrap().clone(),
        vec![
            "POST web01 start force=".to_string(),
            "POST web01 stop force=true".to_string(),
            "POST my vm restart force=".to_string(),
            "DELETE db01 delete_disks=true".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let (base, _log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();

    let err = client.vm_action("busy", VmAction::Start).await.unwrap_err();
    assert_eq!(err, ApiError::Application { status: 400, detail: Some("ВМ уже запущена".into()) });

    let err = client.get_vm("ghost").await.unwrap_err();
    assert_eq!(err.to_string(), "ВМ не найдена");

    let err = client.get_vm("broken").await.unwrap_err();
    assert_eq!(err, ApiError::Application { status: 502, detail: None });
    assert_eq!(err.user_message("Ошибка"), "HTTP 502");
}

#[tokio::test]
async fn test_create_vm_validation_error() {
    let (base, log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();
    let request = CreateVmRequest {
        name: "x".into(),
        memory: None,
        vcpus: Some(1),
        disk_size: Some(10),
        iso_path: None,
        network: "default".into(),
    };
    let err = client.create_vm(&request).await.unwrap_err();
    match err {
        ApiError::Application { status, detail } => {
            assert_eq!(status, 422);
            assert!(detail.unwrap().contains("memory"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let request = CreateVmRequest { memory: Some(512), ..request };
    client.create_vm(&request).await.unwrap();
    assert!(log.lock().unwrap()[0].contains(r#""memory":512"#));
}

#[tokio::test]
async fn test_iso_endpoints() {
    let (base, log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();

    let isos = client.list_isos().await.unwrap();
    assert_eq!(isos[0].path, "/isos/ubuntu.iso");

    client.rescan_isos().await.unwrap();
    client
        .download_iso(&DownloadIsoRequest { url: "https://m.example/a.iso".into(), filename: None })
        .await
        .unwrap();
    client.delete_iso("/isos/ubuntu.iso").await.unwrap();

    let log = log.lock().unwrap().clone();
    assert_eq!(log[0], "RESCAN");
    assert!(log[1].contains(r#""url":"https://m.example/a.iso""#));
    assert!(log[1].contains(r#""filename":null"#));
    assert_eq!(log[2], r#"DELETE_ISO "/isos/ubuntu.iso""#);
}

#[tokio::test]
async fn test_unexpected_shape_is_decode_error() {
    let (base, _log) = spawn_backend().await;
    let client = KvmClient::new(base).unwrap();
    assert!(matches!(client.os_catalog().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    set_silent(true);
    let client = KvmClient::new("http://127.0.0.1:1/api").unwrap();
    let err = client.list_vms().await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.user_message("Ошибка загрузки ВМ").starts_with("Ошибка загрузки ВМ: "));
}

#[tokio::test]
async fn test_console_url_encodes_name() {
    let client = KvmClient::new("http://kvm:8001/api/").unwrap();
    assert_eq!(client.console_url("my vm"), "http://kvm:8001/api/vms/my%20vm/console/viewer");
}
