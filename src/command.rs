//! Command execution for tagged-release.
//!
//! The tool has a single workflow, run in CI after a commit has been tagged
//! with one or more `package@version` tags:
//!
//! 1. **Discovery**: list the tags pointing at HEAD
//! 2. **Matching**: find the workspace package each tag names
//! 3. **Notes**: pull the version's section out of the package CHANGELOG.md
//! 4. **Publishing**: create a release on the forge for each tag
//!
//! Per-tag problems are logged and the run moves on. Only failures that
//! prevent the workflow from starting at all abort the run.

/// Release publication for tags on the current commit.
pub mod release;
