//! Common test helper functions shared across test modules.
//!
//! This module provides reusable utilities for creating workspace fixtures
//! and forge requests, reducing duplication across test suites.
use secrecy::SecretString;
use std::{fs, path::Path};

use crate::{
    forge::{config::RemoteConfig, request::CreateReleaseRequest},
    workspace::MANIFEST_FILE,
};

/// Creates a test RemoteConfig pointing at acme/monorepo.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        api_url: "https://api.github.com".to_string(),
        owner: "acme".to_string(),
        repo: "monorepo".to_string(),
        token: SecretString::from("test-token".to_string()),
        dry_run: false,
    }
}

/// Creates a non-prerelease request whose title is the tag itself.
pub fn create_test_release_request(tag: &str) -> CreateReleaseRequest {
    CreateReleaseRequest {
        tag_name: tag.to_string(),
        name: tag.to_string(),
        body: format!("Release {tag}"),
        draft: false,
        prerelease: false,
    }
}

/// Writes a root package.json whose `workspaces` field is the given JSON.
///
/// # Example
/// ```ignore
/// write_root_manifest(tmp.path(), r#"["packages/*"]"#);
/// ```
pub fn write_root_manifest(root: &Path, workspaces: &str) {
    let content = format!(
        r#"{{ "name": "root", "private": true, "workspaces": {workspaces} }}"#
    );
    fs::write(root.join(MANIFEST_FILE), content).unwrap();
}

/// Writes `<root>/<dir>/package.json` for a package.
pub fn write_package(root: &Path, dir: &str, name: &str, version: &str) {
    let pkg_dir = root.join(dir);
    fs::create_dir_all(&pkg_dir).unwrap();

    let content = serde_json::to_string_pretty(&serde_json::json!({
        "name": name,
        "version": version,
    }))
    .unwrap();

    fs::write(pkg_dir.join(MANIFEST_FILE), content).unwrap();
}
