//! Node workspace enumeration and package lookup.
//!
//! The root `package.json` lists workspace glob patterns. Each pattern is
//! expanded to the `package.json` files beneath it, and those manifests are
//! read lazily while searching for the package a tag refers to.
use color_eyre::eyre::{WrapErr, eyre};
use log::*;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{result::Result, tag::PackageTag};

/// File name of a node package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Changelog file looked up next to each package manifest.
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// `workspaces` accepts both the npm array form and the yarn object form.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Workspaces {
    Patterns(Vec<String>),
    Config {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Default for Workspaces {
    fn default() -> Self {
        Self::Patterns(vec![])
    }
}

impl Workspaces {
    pub fn patterns(&self) -> &[String] {
        match self {
            Workspaces::Patterns(patterns) => patterns,
            Workspaces::Config { packages } => packages,
        }
    }
}

/// Root manifest of the monorepo. Only `workspaces` matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootManifest {
    #[serde(default)]
    pub workspaces: Workspaces,
}

/// Manifest of a single workspace package.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
}

/// A package discovered in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub manifest_path: PathBuf,
}

impl PackageRecord {
    /// Path of the CHANGELOG.md next to this package's manifest.
    pub fn changelog_path(&self) -> PathBuf {
        self.manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CHANGELOG_FILE)
    }
}

/// Workspace rooted at a directory containing the root `package.json`.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    manifest_paths: Vec<PathBuf>,
}

impl Workspace {
    /// Load the root manifest and expand its workspace patterns.
    ///
    /// A missing or malformed root manifest and invalid glob patterns are
    /// errors. Absent `workspaces` yields an empty workspace.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root_manifest = load_root_manifest(&root)?;
        let manifest_paths =
            expand_patterns(&root, root_manifest.workspaces.patterns())?;

        debug!(
            "discovered {} workspace manifests under {}",
            manifest_paths.len(),
            root.display()
        );

        Ok(Self {
            root,
            manifest_paths,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_paths(&self) -> &[PathBuf] {
        &self.manifest_paths
    }

    /// Find the first package whose manifest name and version equal the
    /// tag's. Manifests that can't be read or parsed are skipped.
    pub fn find_package(&self, tag: &PackageTag) -> Option<PackageRecord> {
        for path in self.manifest_paths.iter() {
            let manifest = match load_package_manifest(path) {
                Ok(manifest) => manifest,
                Err(err) => {
                    warn!("skipping manifest {}: {err:#}", path.display());
                    continue;
                }
            };

            if manifest.name == tag.name && manifest.version == tag.version {
                debug!("matched {tag} to {}", path.display());
                return Some(PackageRecord {
                    name: manifest.name,
                    version: manifest.version,
                    manifest_path: path.clone(),
                });
            }
        }

        None
    }
}

fn load_root_manifest(root: &Path) -> Result<RootManifest> {
    let path = root.join(MANIFEST_FILE);

    let content = fs::read_to_string(&path).wrap_err_with(|| {
        format!("failed to read root manifest: {}", path.display())
    })?;

    let manifest: RootManifest =
        serde_json::from_str(&content).wrap_err_with(|| {
            format!("failed to parse root manifest: {}", path.display())
        })?;

    Ok(manifest)
}

/// Read and parse a package manifest, requiring `name` and `version`.
pub fn load_package_manifest(path: &Path) -> Result<PackageManifest> {
    let content = fs::read_to_string(path).wrap_err_with(|| {
        format!("failed to read manifest: {}", path.display())
    })?;

    let manifest: PackageManifest = serde_json::from_str(&content)
        .wrap_err_with(|| {
            format!("invalid package manifest: {}", path.display())
        })?;

    Ok(manifest)
}

/// Expand each `<root>/<pattern>/package.json` glob, keeping pattern order
/// then match order. Duplicates are kept.
fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = vec![];

    for pattern in patterns.iter() {
        let full = root.join(pattern).join(MANIFEST_FILE);
        let full = full.to_string_lossy().replace('\\', "/");

        let entries = glob::glob(&full).map_err(|err| {
            eyre!("invalid workspace pattern \"{pattern}\": {err}")
        })?;

        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                Err(err) => warn!("unable to read workspace path: {err}"),
            }
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{write_package, write_root_manifest};
    use tempfile::TempDir;

    fn tag(name: &str, version: &str) -> PackageTag {
        PackageTag {
            name: name.into(),
            version: version.into(),
        }
    }

    #[test]
    fn expands_workspace_patterns_in_order() {
        let tmp = TempDir::new().unwrap();
        write_root_manifest(tmp.path(), r#"["packages/*", "tools/cli"]"#);
        write_package(tmp.path(), "packages/b", "b", "1.0.0");
        write_package(tmp.path(), "packages/a", "a", "1.0.0");
        write_package(tmp.path(), "tools/cli", "cli", "0.1.0");

        let workspace = Workspace::load(tmp.path()).unwrap();
        let paths = workspace
            .manifest_paths()
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect::<Vec<PathBuf>>();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("packages/a/package.json"),
                PathBuf::from("packages/b/package.json"),
                PathBuf::from("tools/cli/package.json"),
            ]
        );
    }

    #[test]
    fn supports_yarn_workspace_object() {
        let tmp = TempDir::new().unwrap();
        write_root_manifest(
            tmp.path(),
            r#"{ "packages": ["packages/*"], "nohoist": ["**/foo"] }"#,
        );
        write_package(tmp.path(), "packages/a", "a", "1.0.0");

        let workspace = Workspace::load(tmp.path()).unwrap();
        assert_eq!(workspace.manifest_paths().len(), 1);
    }

    #[test]
    fn missing_workspaces_field_is_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), r#"{ "name": "root" }"#)
            .unwrap();

        let workspace = Workspace::load(tmp.path()).unwrap();
        assert!(workspace.manifest_paths().is_empty());
    }

    #[test]
    fn duplicate_matches_are_kept() {
        let tmp = TempDir::new().unwrap();
        write_root_manifest(tmp.path(), r#"["packages/*", "packages/a"]"#);
        write_package(tmp.path(), "packages/a", "a", "1.0.0");

        let workspace = Workspace::load(tmp.path()).unwrap();
        assert_eq!(workspace.manifest_paths().len(), 2);
    }

    #[test]
    fn missing_root_manifest_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(Workspace::load(tmp.path()).is_err());
    }

    #[test]
    fn malformed_root_manifest_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert!(Workspace::load(tmp.path()).is_err());

        fs::write(tmp.path().join(MANIFEST_FILE), r#"{"workspaces": 42}"#)
            .unwrap();
        assert!(Workspace::load(tmp.path()).is_err());
    }

    #[test]
    fn finds_package_by_name_and_version() {
        let tmp = TempDir::new().unwrap();
        write_root_manifest(tmp.path(), r#"["packages/*"]"#);
        write_package(tmp.path(), "packages/a", "a", "1.0.0");
        write_package(tmp.path(), "packages/b", "@scope/b", "2.0.0-rc.1");

        let workspace = Workspace::load(tmp.path()).unwrap();

        let record = workspace.find_package(&tag("@scope/b", "2.0.0-rc.1"));
        let record = record.unwrap();
        assert_eq!(record.name, "@scope/b");
        assert_eq!(
            record.changelog_path(),
            tmp.path().join("packages/b/CHANGELOG.md")
        );

        assert!(workspace.find_package(&tag("a", "2.0.0")).is_none());
        assert!(workspace.find_package(&tag("c", "1.0.0")).is_none());
    }

    #[test]
    fn skips_unparseable_package_manifests() {
        let tmp = TempDir::new().unwrap();
        write_root_manifest(tmp.path(), r#"["packages/*"]"#);
        let broken = tmp.path().join("packages/a");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join(MANIFEST_FILE), r#"{ "name": "a" }"#).unwrap();
        write_package(tmp.path(), "packages/b", "b", "1.0.0");

        let workspace = Workspace::load(tmp.path()).unwrap();
        assert!(workspace.find_package(&tag("b", "1.0.0")).is_some());
        assert!(workspace.find_package(&tag("a", "1.0.0")).is_none());
    }
}
