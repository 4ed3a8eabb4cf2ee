//! Result type shared across tagged-release.
//!
//! Fatal errors travel as `color_eyre` reports so they surface with context
//! when they escape `main`. Per-tag forge failures use the typed
//! [`ReleaseError`](crate::error::ReleaseError) instead, because the
//! publisher needs to tell a conflict apart from other failures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err_with(|| format!("failed to read {}", path.display()))?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout tagged-release.
pub type Result<T> = EyreResult<T>;
