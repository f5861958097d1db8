//! Asset module
//!
//! Polled asset loading: a loader hands back a request handle, and each
//! poll reports `Pending`, `Loaded(Subtree)` or `Failed(reason)`.

mod loader;
mod mock_loader;

pub use loader::{AssetLoad, AssetLoader, AssetRequest};
pub use mock_loader::MockAssetLoader;
