//! Parsing of `package@version` release tags.
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Name group is greedy so the split happens at the last `@`, which keeps
/// scoped names like `@scope/pkg` intact.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)@(.+)$").unwrap());

static PRERELEASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-(alpha|beta|rc|pre)").unwrap());

/// A tag split into its package name and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTag {
    pub name: String,
    pub version: String,
}

impl PackageTag {
    /// Parse a raw tag, returning `None` when it is not `name@version`.
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = TAG_REGEX.captures(tag)?;

        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let version = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        if name.is_empty() || version.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Release title, `<name>@<version>`.
    pub fn title(&self) -> String {
        self.to_string()
    }

    pub fn is_prerelease(&self) -> bool {
        is_prerelease(&self.version)
    }
}

impl fmt::Display for PackageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// True when the version carries an alpha, beta, rc or pre marker.
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE_REGEX.is_match(version)
}
