//! Error types for the Orrery3D core
//!
//! This module defines the error types used throughout the crate:
//! structural scene-graph violations, configuration errors, asset
//! failures and renderer collaborator failures.

use thiserror::Error;

/// Result type for Orrery3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Orrery3D errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Attaching a node would create a cycle in the scene graph
    #[error("Cycle error: {0}")]
    Cycle(String),

    /// The node already has a parent and must be detached first
    #[error("Already owned: {0}")]
    AlreadyOwned(String),

    /// Stale node key, or an operation the World root does not allow
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Rejected configuration value (field of view, aspect ratio, clip planes)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An asset load failed (terminal for that asset)
    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    /// Renderer collaborator error
    #[error("Backend error: {0}")]
    Backend(String),
}

// ===== ERROR MACROS =====

/// Build an [`Error`] variant and log it at ERROR severity
///
/// # Example
///
/// ```no_run
/// # use orrery_3d::engine_err;
/// let err = engine_err!("orrery3d::SceneGraph", InvalidNode, "node {} not found", 3);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::orrery3d::Error::$kind(message)
    }};
}

/// Log an error at ERROR severity and return it from the enclosing function
///
/// # Example
///
/// ```no_run
/// # use orrery_3d::engine_bail;
/// # fn check(fov: f32) -> orrery_3d::orrery3d::Result<()> {
/// if fov <= 0.0 {
///     engine_bail!("orrery3d::FocusCamera", InvalidConfig, "fov {} out of range", fov);
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
