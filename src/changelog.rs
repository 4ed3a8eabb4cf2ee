//! Extraction of a single version's notes from a CHANGELOG.md file.
use color_eyre::eyre::WrapErr;
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

use crate::result::Result;

/// Any level-2 markdown heading.
static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+").unwrap());

/// Scanner state while walking the changelog top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Scanning,
    InSection,
}

/// Notes used when a version has no section or an empty one.
pub fn fallback_notes(version: &str) -> String {
    format!("Release {version}")
}

/// Returns the body of the `## <version>` (or `## [<version>]`) section.
///
/// The heading itself is not included and the scan stops at the next
/// level-2 heading, so a repeated heading for the same version later in
/// the file is never reached. Blank or missing sections yield
/// `Release <version>`.
pub fn extract_notes(content: &str, version: &str) -> String {
    let start = Regex::new(&format!(
        r"^##\s+\[?{}\]?",
        regex::escape(version)
    ))
    .expect("escaped version always forms a valid pattern");

    let mut state = SectionState::Scanning;
    let mut lines = vec![];

    for line in content.split('\n') {
        match state {
            SectionState::Scanning => {
                if start.is_match(line) {
                    state = SectionState::InSection;
                }
            }
            SectionState::InSection => {
                if SECTION_HEADING.is_match(line) {
                    break;
                }
                lines.push(line);
            }
        }
    }

    let notes = lines.join("\n");
    let notes = notes.trim();

    if notes.is_empty() {
        return fallback_notes(version);
    }

    notes.to_string()
}

/// Reads a changelog from disk and extracts the notes for `version`.
pub fn extract_notes_from_file(path: &Path, version: &str) -> Result<String> {
    let content = fs::read_to_string(path).wrap_err_with(|| {
        format!("failed to read changelog: {}", path.display())
    })?;

    Ok(extract_notes(&content, version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CHANGELOG: &str = "# Changelog

## 2.0.0

B

## 1.0.0

A
";

    #[test]
    fn extracts_requested_section_only() {
        assert_eq!(extract_notes(CHANGELOG, "1.0.0"), "A");
        assert_eq!(extract_notes(CHANGELOG, "2.0.0"), "B");
    }

    #[test]
    fn bracketed_heading_matches_like_plain_heading() {
        let content = "## [1.0.0] - 2024-01-01\n\n- fixed things\n\n## [0.9.0]\n\n- older";
        assert_eq!(extract_notes(content, "1.0.0"), "- fixed things");
    }

    #[test]
    fn version_metacharacters_match_literally() {
        let content = "## 1.0.0+build\n\nbuild notes\n\n## 1x0x0 build\n\nwrong";
        assert_eq!(extract_notes(content, "1.0.0+build"), "build notes");

        // unescaped, "1.0.0" would match "1x0x0"
        let content = "## 1x0x0\n\nwrong\n";
        assert_eq!(extract_notes(content, "1.0.0"), "Release 1.0.0");
    }

    #[test]
    fn blank_section_falls_back() {
        let content = "## 1.0.0\n\n   \n\n## 0.9.0\n\nolder";
        assert_eq!(extract_notes(content, "1.0.0"), "Release 1.0.0");
    }

    #[test]
    fn missing_version_falls_back() {
        assert_eq!(extract_notes(CHANGELOG, "3.0.0"), "Release 3.0.0");
        assert_eq!(extract_notes("", "3.0.0"), "Release 3.0.0");
    }

    #[test]
    fn stops_at_first_section_end() {
        let content = "## 1.0.0\n\nfirst\n\n## 0.9.0\n\nmiddle\n\n## 1.0.0\n\nsecond";
        assert_eq!(extract_notes(content, "1.0.0"), "first");
    }

    #[test]
    fn runs_to_end_of_file_for_last_section() {
        let content = "## 1.0.0\n\n### Features\n\n- one\n- two\n";
        assert_eq!(
            extract_notes(content, "1.0.0"),
            "### Features\n\n- one\n- two"
        );
    }

    #[test]
    fn level_three_headings_do_not_end_section() {
        let content = "## 1.0.0\n### Fixes\n- a\n## 0.1.0\n- b";
        assert_eq!(extract_notes(content, "1.0.0"), "### Fixes\n- a");
    }

    #[test]
    fn reads_changelog_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");
        fs::write(&path, CHANGELOG).unwrap();

        let notes = extract_notes_from_file(&path, "2.0.0").unwrap();
        assert_eq!(notes, "B");
    }

    #[test]
    fn unreadable_changelog_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");

        assert!(extract_notes_from_file(&path, "1.0.0").is_err());
    }
}
