#![allow(dead_code)]

use async_trait::async_trait;
use joke_service::db::{JokeSource, SourceError};
use joke_service::models::Joke;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// In-memory joke source that replays a script of outcomes.
///
/// Once the script runs out, every call repeats `fallback`.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<Joke>, SourceError>>>,
    fallback: Result<Vec<Joke>, SourceError>,
    calls: AtomicU32,
    reachable: AtomicBool,
}

impl ScriptedSource {
    pub fn new(fallback: Result<Vec<Joke>, SourceError>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicU32::new(0),
            reachable: AtomicBool::new(true),
        }
    }

    pub fn always_ok(jokes: Vec<Joke>) -> Self {
        Self::new(Ok(jokes))
    }

    pub fn always_connect_error() -> Self {
        Self::new(Err(SourceError::Connect("connection refused".into()))).unreachable()
    }

    pub fn always_query_error() -> Self {
        Self::new(Err(SourceError::Query("relation \"jokes\" does not exist".into())))
    }

    pub fn then(self, outcome: Result<Vec<Joke>, SourceError>) -> Self {
        self.script.lock().push_back(outcome);
        self
    }

    pub fn unreachable(self) -> Self {
        self.reachable.store(false, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JokeSource for ScriptedSource {
    async fn fetch_jokes(&self) -> Result<Vec<Joke>, SourceError> {
        // Suspend like real I/O so concurrent callers interleave
        tokio::task::yield_now().await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    async fn ping(&self) -> Result<(), SourceError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SourceError::Connect("connection refused".into()))
        }
    }
}

pub fn jokes(n: usize) -> Vec<Joke> {
    (0..n)
        .map(|i| Joke::new(format!("Joke #{}", i + 1), format!("Punchline #{}", i + 1)))
        .collect()
}

pub fn connect_error() -> Result<Vec<Joke>, SourceError> {
    Err(SourceError::Connect("connection refused".into()))
}

pub fn query_error() -> Result<Vec<Joke>, SourceError> {
    Err(SourceError::Query("statement timeout".into()))
}
