#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use craftcoach_data::error::{Error, Result};
use craftcoach_data::services::http_cache::{CachedFetcher, HttpTransport, TransportResponse};

/// Fresh in-memory SQLite with every migration applied
pub async fn setup_test_db() -> std::result::Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(TransportResponse),
    Fail(String),
}

/// Canned upstream. Each URL answers from its queue; the last reply is
/// repeated once the queue is down to one. Unknown URLs fail as if the
/// host were unreachable.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, url: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn respond(&self, url: &str, status: u16, body: impl Into<Vec<u8>>, etag: Option<&str>) {
        self.push(
            url,
            Reply::Respond(TransportResponse {
                status: StatusCode::from_u16(status).unwrap(),
                etag: etag.map(str::to_owned),
                last_modified: None,
                content_type: None,
                body: body.into(),
            }),
        );
    }

    pub fn ok(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.respond(url, 200, body, None);
    }

    pub fn ok_json(&self, url: &str, body: &serde_json::Value) {
        self.ok(url, body.to_string());
    }

    pub fn status(&self, url: &str, status: u16) {
        self.respond(url, status, Vec::new(), None);
    }

    pub fn fail(&self, url: &str) {
        self.push(url, Reply::Fail(format!("connection refused: {url}")));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        _timeout: Duration,
    ) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport(format!("no route scripted for {url}"))),
        }
    }
}

pub fn fetcher(transport: &Arc<ScriptedTransport>, cache_dir: &Path) -> CachedFetcher {
    let transport: Arc<dyn HttpTransport> = transport.clone();
    CachedFetcher::new(transport, cache_dir).without_delay()
}
