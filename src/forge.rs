//! Interface to the hosted forge that publishes releases.
//!
//! Provides token-based authentication and release creation through a
//! common trait so the publisher can be tested against a mock.

/// Configuration and authentication for the forge.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Dry-run aware wrapper around a forge implementation.
pub mod manager;

/// Request and response types for forge calls.
pub mod request;

/// Common trait for forge platform abstraction.
pub mod traits;
