/// Asset loader trait - outbound interface to model/font/texture loaders
///
/// Loads are asynchronous relative to the frame loop: `request` returns
/// immediately with a handle, and the owner polls that handle once per
/// frame until it reports a terminal outcome.

use crate::scene::Subtree;

/// Opaque handle to one load in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetRequest(u64);

impl AssetRequest {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// State of a load, as reported by one poll
#[derive(Debug, Clone, PartialEq)]
pub enum AssetLoad {
    /// Still loading; poll again next frame
    Pending,
    /// Finished: the detached fragment to attach
    Loaded(Subtree),
    /// Failed for good; never retried
    Failed(String),
}

impl AssetLoad {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AssetLoad::Pending)
    }
}

/// Loader collaborator (file parsing lives behind this trait)
///
/// After a poll returns `Loaded` or `Failed`, the request is finished and
/// the loader may forget it.
pub trait AssetLoader {
    /// Start loading `path`
    fn request(&mut self, path: &str) -> AssetRequest;

    /// Current state of `request`
    fn poll(&mut self, request: AssetRequest) -> AssetLoad;
}
