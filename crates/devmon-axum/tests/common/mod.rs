//! Shared fakes and helpers for router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use devmon_axum::bootstrap::{AxumContext, CorsConfig};
use devmon_axum::routes::create_router;
use devmon_core::{
    CoreError, DeviceListService, DeviceMonitorService, DeviceMonitorView, EventLogEntry,
    EventLogSink, MonitorConfigService, MonitorConfigUpdate, RepositoryError,
};
use devmon_db::TestDb;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// One call received by [`RecordingMonitorService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorCall {
    Get(i64),
    Update(MonitorConfigUpdate),
}

/// Monitor service that records every call and answers with a fixed view.
pub struct RecordingMonitorService {
    calls: Mutex<Vec<MonitorCall>>,
    view: Option<DeviceMonitorView>,
}

impl RecordingMonitorService {
    pub fn returning(view: DeviceMonitorView) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            view: Some(view),
        }
    }

    /// Answers every call with `NotFound`.
    pub fn not_found() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            view: None,
        }
    }

    pub fn calls(&self) -> Vec<MonitorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: MonitorCall) -> Result<DeviceMonitorView, CoreError> {
        self.calls.lock().unwrap().push(call);
        self.view
            .clone()
            .ok_or_else(|| RepositoryError::NotFound("monitor config".to_string()).into())
    }
}

#[async_trait]
impl DeviceMonitorService for RecordingMonitorService {
    async fn get_monitor_config(&self, device_id: i64) -> Result<DeviceMonitorView, CoreError> {
        self.answer(MonitorCall::Get(device_id))
    }

    async fn update_monitor_config(
        &self,
        update: MonitorConfigUpdate,
    ) -> Result<DeviceMonitorView, CoreError> {
        self.answer(MonitorCall::Update(update))
    }
}

/// Event-log sink that keeps entries in memory.
#[derive(Default)]
pub struct RecordingEventLog {
    entries: Mutex<Vec<EventLogEntry>>,
}

impl RecordingEventLog {
    pub fn entries(&self) -> Vec<EventLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventLogSink for RecordingEventLog {
    async fn record(&self, entry: EventLogEntry) -> Result<(), RepositoryError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

/// Event-log sink that always fails.
pub struct FailingEventLog;

#[async_trait]
impl EventLogSink for FailingEventLog {
    async fn record(&self, _entry: EventLogEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Storage("disk full".to_string()))
    }
}

pub fn view(id: i64, status: i32) -> DeviceMonitorView {
    DeviceMonitorView {
        id,
        device_name: Some("edge-01".to_string()),
        status,
        url: Some("http://example.com/agent".to_string()),
    }
}

/// Router over a fake monitor service; device routes use an in-memory database.
pub async fn monitor_app(
    monitor: Arc<RecordingMonitorService>,
    event_log: Arc<dyn EventLogSink>,
) -> Router {
    let db = TestDb::new().await.unwrap();
    let repos = db.repos();
    let ctx = AxumContext {
        monitor,
        onboarding: Arc::new(MonitorConfigService::new(repos.device_monitor)),
        devices: Arc::new(DeviceListService::new(repos.device_list)),
        event_log,
    };
    create_router(ctx, &CorsConfig::AllowAll)
}

/// Router wired to the default services over an in-memory database.
pub async fn db_app() -> (Router, TestDb) {
    let db = TestDb::new().await.unwrap();
    let ctx = AxumContext::from_repos(db.repos());
    (create_router(ctx, &CorsConfig::AllowAll), db)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Send one request and return the status and JSON body.
pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let text = body_text(response).await;
    let json = if text.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
    };
    (status, json)
}
