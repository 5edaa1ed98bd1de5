// src/testing.rs
// =============================================================================
// Test doubles shared by the fetch, store and crawl tests.
//
// - FakeHttp: answers GET requests from a script instead of the network,
//   and records every URL it was asked for
// - ScriptedPolicy: answers the "Create dirs?" question without a terminal
//
// Both are cheap to clone: clones share the same script/record through an
// Arc<Mutex<..>>, so a test keeps one handle and gives the other away.
//
// Only compiled for `cargo test` (see #[cfg(test)] in main.rs).
// =============================================================================

use crate::error::FetchError;
use crate::fetch::{HttpClient, HttpResponse};
use crate::store::CreationPolicy;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// One scripted answer
#[derive(Debug, Clone)]
pub enum Reply {
    Response(HttpResponse),
    Timeout,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Response(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    pub fn status(status: u16) -> Self {
        Reply::Response(HttpResponse {
            status,
            ..HttpResponse::default()
        })
    }

    pub fn rate_limited(retry_after: &str) -> Self {
        Reply::Response(HttpResponse {
            status: 429,
            headers: vec![("Retry-After".to_string(), retry_after.to_string())],
            body: String::new(),
        })
    }
}

#[derive(Default)]
struct Scripts {
    replies: HashMap<String, VecDeque<Reply>>,
    calls: Vec<String>,
}

// Serves scripted replies per URL; the last reply of a script repeats forever.
// Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct FakeHttp {
    scripts: Arc<Mutex<Scripts>>,
}

impl FakeHttp {
    pub fn script(&self, url: &str, replies: Vec<Reply>) {
        let mut scripts = self.scripts.lock().unwrap();
        scripts.replies.insert(url.to_string(), replies.into());
    }

    // Both exports of a pad answering 200
    pub fn page(&self, address: &str, text: &str, html: &str) {
        self.script(&format!("{}/export/txt", address), vec![Reply::ok(text)]);
        self.script(&format!("{}/export/html", address), vec![Reply::ok(html)]);
    }

    pub fn calls(&self) -> Vec<String> {
        self.scripts.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut scripts = self.scripts.lock().unwrap();
        scripts.calls.push(url.to_string());

        // Pop while more than one reply is left, so the last one sticks
        let reply = match scripts.replies.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                ..HttpResponse::default()
            }),
        }
    }
}

// Answers every directory prompt the same way and remembers what was asked
#[derive(Clone)]
pub struct ScriptedPolicy {
    answer: bool,
    asked: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScriptedPolicy {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::default(),
        }
    }

    pub fn asked(&self) -> Vec<PathBuf> {
        self.asked.lock().unwrap().clone()
    }
}

impl CreationPolicy for ScriptedPolicy {
    fn should_create(&self, dir: &Path) -> bool {
        self.asked.lock().unwrap().push(dir.to_path_buf());
        self.answer
    }
}
