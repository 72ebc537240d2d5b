#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use jobrelay_core::job::{Job, JobFilter, NewJob, SubmitJob};
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;
use jobrelay_engine::{EngineConfig, JobEngine, JobStore, MemoryJobStore, StoreError};
use jobrelay_events::{CompletionNotifier, JobCompletedPayload, WebhookDelivery, WebhookError};

/// Short work duration so tests finish quickly.
pub const FAST: Duration = Duration::from_millis(20);

/// Work duration long enough that completion never happens during a test.
pub const NEVER: Duration = Duration::from_secs(3600);

// ---------------------------------------------------------------------------
// Engine construction
// ---------------------------------------------------------------------------

pub fn engine_with(store: Arc<dyn JobStore>, config: EngineConfig) -> JobEngine {
    JobEngine::new(store, Arc::new(WebhookDelivery::new()), config)
}

pub fn memory_engine(delay: Duration) -> JobEngine {
    engine_with(
        Arc::new(MemoryJobStore::new()),
        EngineConfig::default().with_completion_delay(delay),
    )
}

pub fn submit_input(task_name: &str, payload: serde_json::Value, priority: Option<&str>) -> SubmitJob {
    SubmitJob {
        task_name: Some(task_name.to_string()),
        payload: Some(payload),
        priority: priority.map(str::to_string),
    }
}

/// Poll until the job reaches `status`.
pub async fn wait_for(engine: &JobEngine, id: DbId, status: JobStatus) -> Job {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let job = engine.get(id).await.unwrap();
        if job.status == status {
            return job;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "job {id} stuck in {} waiting for {status}",
            job.status
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Wait until every completion task spawned so far has finished.
pub async fn settle(engine: &JobEngine) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while engine.in_flight() > 0 {
        assert!(tokio::time::Instant::now() < deadline, "completion tasks never finished");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

// ---------------------------------------------------------------------------
// Webhook receiver
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Receiver {
    received: Arc<Mutex<Vec<serde_json::Value>>>,
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

async fn hook(
    State(receiver): State<Receiver>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, &'static str) {
    receiver.received.lock().unwrap().push(payload);
    tokio::time::sleep(receiver.delay).await;
    (receiver.status, receiver.body)
}

/// A running webhook receiver on an ephemeral localhost port.
pub struct TestReceiver {
    pub url: String,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl TestReceiver {
    /// Start a receiver that answers every POST with `status` and `body`.
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_slow(status, body, Duration::ZERO).await
    }

    /// Start a receiver that waits `delay` before answering each POST.
    pub async fn start_slow(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().route("/hook", post(hook)).with_state(Receiver {
            received: Arc::clone(&received),
            status,
            body,
            delay,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/hook"),
            received,
        }
    }

    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// Store and notifier doubles
// ---------------------------------------------------------------------------

/// Memory store that refuses selected status writes.
pub struct FlakyStore {
    inner: MemoryJobStore,
    refuse: Vec<JobStatus>,
}

impl FlakyStore {
    pub fn refusing(refuse: &[JobStatus]) -> Self {
        Self {
            inner: MemoryJobStore::new(),
            refuse: refuse.to_vec(),
        }
    }
}

#[async_trait]
impl JobStore for FlakyStore {
    async fn create(&self, input: &NewJob) -> Result<Job, StoreError> {
        self.inner.create(input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        self.inner.list(filter).await
    }

    async fn update_status(
        &self,
        id: DbId,
        status: JobStatus,
    ) -> Result<Option<Job>, StoreError> {
        if self.refuse.contains(&status) {
            return Err(StoreError::Unavailable(format!("refusing {status} write")));
        }
        self.inner.update_status(id, status).await
    }

    async fn set_webhook_log(
        &self,
        id: DbId,
        webhook_log: &str,
    ) -> Result<Option<Job>, StoreError> {
        self.inner.set_webhook_log(id, webhook_log).await
    }

    async fn delete(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("flaky".into()))
    }
}

/// Notifier that always fails with the given HTTP status.
pub struct RejectingNotifier(pub u16);

#[async_trait]
impl CompletionNotifier for RejectingNotifier {
    async fn deliver(
        &self,
        _url: &str,
        _payload: &JobCompletedPayload,
    ) -> Result<serde_json::Value, WebhookError> {
        Err(WebhookError::HttpStatus(self.0))
    }
}
