/// Mock asset loader for tests and headless runs (no file access)
///
/// Each path is scripted ahead of time with an outcome and a number of
/// polls that report `Pending` first, which simulates load latency.

use rustc_hash::FxHashMap;
use crate::scene::Subtree;
use super::loader::{AssetLoad, AssetLoader, AssetRequest};

#[derive(Debug, Clone)]
enum Outcome {
    Loaded(Subtree),
    Failed(String),
}

#[derive(Debug, Clone)]
struct Script {
    outcome: Outcome,
    pending_polls: u32,
}

/// Loader that serves scripted outcomes
#[derive(Debug, Default)]
pub struct MockAssetLoader {
    scripts: FxHashMap<String, Script>,
    in_flight: FxHashMap<AssetRequest, Script>,
    requested: Vec<String>,
    next_id: u64,
}

impl MockAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// `path` loads `subtree` after `pending_polls` Pending answers
    pub fn with_asset(mut self, path: &str, subtree: Subtree, pending_polls: u32) -> Self {
        self.scripts.insert(path.to_string(), Script {
            outcome: Outcome::Loaded(subtree),
            pending_polls,
        });
        self
    }

    /// `path` fails with `reason` after `pending_polls` Pending answers
    pub fn with_failure(mut self, path: &str, reason: &str, pending_polls: u32) -> Self {
        self.scripts.insert(path.to_string(), Script {
            outcome: Outcome::Failed(reason.to_string()),
            pending_polls,
        });
        self
    }

    /// Paths requested so far, in order
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    /// Requests not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl AssetLoader for MockAssetLoader {
    fn request(&mut self, path: &str) -> AssetRequest {
        let request = AssetRequest::new(self.next_id);
        self.next_id += 1;
        self.requested.push(path.to_string());

        let script = self.scripts.get(path).cloned().unwrap_or_else(|| Script {
            outcome: Outcome::Failed(format!("file not found: {}", path)),
            pending_polls: 0,
        });
        self.in_flight.insert(request, script);
        request
    }

    fn poll(&mut self, request: AssetRequest) -> AssetLoad {
        let Some(script) = self.in_flight.get_mut(&request) else {
            return AssetLoad::Failed(format!("unknown request {}", request.id()));
        };
        if script.pending_polls > 0 {
            script.pending_polls -= 1;
            return AssetLoad::Pending;
        }

        match self.in_flight.remove(&request).map(|s| s.outcome) {
            Some(Outcome::Loaded(subtree)) => AssetLoad::Loaded(subtree),
            Some(Outcome::Failed(reason)) => AssetLoad::Failed(reason),
            None => AssetLoad::Failed(format!("unknown request {}", request.id())),
        }
    }
}

#[cfg(test)]
#[path = "mock_loader_tests.rs"]
mod tests;
