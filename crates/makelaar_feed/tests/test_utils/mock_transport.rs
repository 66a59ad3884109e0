//! Scripted transport and recording limiter.

#![allow(dead_code)]

use async_trait::async_trait;
use makelaar_error::{FeedError, FeedErrorKind, FeedResult, RateLimitResult};
use makelaar_feed::{Method, Transport, TransportResponse};
use makelaar_rate_limit::RateLimiter;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Something observed by the mocks, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A limiter permit was granted
    Acquire,
    /// A request was sent for the given path
    Send(String),
}

/// Ordered log shared between the transport and the limiter.
pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with the given body
    Ok(String),
    /// The given status with an empty body
    Status(u16, String),
    /// The exchange never completes
    TransportError(String),
    /// The exchange never finishes
    Hang,
}

/// Transport replaying scripted responses in order.
///
/// Requests past the end of the script fail with a transport error.
#[derive(Clone)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    paths: Arc<Mutex<Vec<String>>>,
    log: EventLog,
}

impl MockTransport {
    /// Create a transport replaying `script`.
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self::with_log(script, EventLog::default())
    }

    /// Create a transport recording into an existing event log.
    pub fn with_log(script: Vec<MockResponse>, log: EventLog) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            paths: Arc::new(Mutex::new(Vec::new())),
            log,
        }
    }

    /// Number of requests sent so far.
    pub fn call_count(&self) -> usize {
        self.paths.lock().unwrap().len()
    }

    /// Paths of every request sent so far.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, method: Method, path: &str) -> FeedResult<TransportResponse> {
        assert_eq!(method, Method::GET);
        self.paths.lock().unwrap().push(path.to_string());
        self.log.lock().unwrap().push(Event::Send(path.to_string()));

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Ok(body)) => Ok(TransportResponse::new(200, "OK", body)),
            Some(MockResponse::Status(status, reason)) => {
                Ok(TransportResponse::new(status, reason, Vec::new()))
            }
            Some(MockResponse::TransportError(message)) => {
                Err(FeedError::new(FeedErrorKind::Transport(message)))
            }
            Some(MockResponse::Hang) => std::future::pending::<FeedResult<TransportResponse>>().await,
            None => Err(FeedError::new(FeedErrorKind::Transport(
                "script exhausted".to_string(),
            ))),
        }
    }
}

/// Limiter that grants at once and records every grant.
#[derive(Clone, Default)]
pub struct RecordingLimiter {
    log: EventLog,
}

impl RecordingLimiter {
    /// Create a limiter recording into `log`.
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }

    /// Number of permits granted so far.
    pub fn acquired(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|event| **event == Event::Acquire)
            .count()
    }
}

#[async_trait]
impl RateLimiter for RecordingLimiter {
    async fn acquire(&self, cancel: &CancellationToken) -> RateLimitResult<()> {
        if cancel.is_cancelled() {
            return Err(makelaar_error::RateLimitError::new(
                makelaar_error::RateLimitErrorKind::Cancelled,
            ));
        }
        self.log.lock().unwrap().push(Event::Acquire);
        Ok(())
    }

    fn strategy_name(&self) -> &'static str {
        "recording"
    }
}

/// Feed page body with the given paging and agents.
pub fn page_json(total_pages: u32, current_page: u32, agents: &[(i64, Option<&str>)]) -> String {
    let objects: Vec<serde_json::Value> = agents
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "MakelaarId": id,
                "MakelaarNaam": name,
                "Adres": format!("Straat {}", id),
            })
        })
        .collect();

    serde_json::json!({
        "TotaalAantalObjecten": objects.len(),
        "Paging": {
            "AantalPaginas": total_pages,
            "HuidigePagina": current_page,
            "VolgendeUrl": null,
            "VorigeUrl": null,
        },
        "Objects": objects,
    })
    .to_string()
}
