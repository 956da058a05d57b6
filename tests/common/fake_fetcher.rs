//! FakeFetcher — an in-memory [`Fetch`] with per-reference delays.
//!
//! Useful for driving the loader's fan-out without touching disk or network.
//! Delays use `tokio::time::sleep`, so they resolve instantly and in order
//! under `#[tokio::test(start_paused = true)]`.

use dashfeed::{Fetch, FetchError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Outcome {
    Body(Vec<u8>),
    Fail(String),
    Panic,
}

#[derive(Clone)]
struct Response {
    delay: Duration,
    outcome: Outcome,
}

/// Records which references finished fetching, in completion order.
#[derive(Clone, Default)]
pub struct CompletionLog(Arc<Mutex<Vec<String>>>);

impl CompletionLog {
    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, reference: &str) {
        self.0.lock().unwrap().push(reference.to_string());
    }
}

/// In-memory fetcher. Unknown references fail with `NotFound`.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Response>,
    completions: CompletionLog,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` immediately.
    pub fn serve(self, reference: &str, body: &str) -> Self {
        self.serve_after(reference, body, Duration::ZERO)
    }

    /// Serve `body` once `delay` has elapsed.
    pub fn serve_after(mut self, reference: &str, body: &str, delay: Duration) -> Self {
        self.responses.insert(
            reference.to_string(),
            Response {
                delay,
                outcome: Outcome::Body(body.as_bytes().to_vec()),
            },
        );
        self
    }

    /// Fail with a transport error once `delay` has elapsed.
    pub fn fail_after(mut self, reference: &str, message: &str, delay: Duration) -> Self {
        self.responses.insert(
            reference.to_string(),
            Response {
                delay,
                outcome: Outcome::Fail(message.to_string()),
            },
        );
        self
    }

    /// Panic inside the fetch, killing the task that runs it.
    pub fn panic_on(mut self, reference: &str) -> Self {
        self.responses.insert(
            reference.to_string(),
            Response {
                delay: Duration::ZERO,
                outcome: Outcome::Panic,
            },
        );
        self
    }

    /// Handle to the completion log; stays valid after the fetcher moves
    /// into a loader.
    pub fn completions(&self) -> CompletionLog {
        self.completions.clone()
    }
}

impl Fetch for FakeFetcher {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        let Some(response) = self.responses.get(reference).cloned() else {
            return Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{reference}: no such fixture"),
            )));
        };

        tokio::time::sleep(response.delay).await;
        self.completions.push(reference);

        match response.outcome {
            Outcome::Body(bytes) => Ok(bytes),
            Outcome::Fail(message) => Err(FetchError::Transport(message)),
            Outcome::Panic => panic!("fake fetch of {reference} panicked"),
        }
    }
}
