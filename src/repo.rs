//! Read-only git queries used to find the tags on the current commit.
//!
//! Tag discovery goes through the [`Vcs`] trait so the release pipeline can
//! be driven by a mock in tests. [`Repository`] is the libgit2-backed
//! implementation used at runtime.
use color_eyre::eyre::WrapErr;
use git2::Oid;
use log::*;
use std::path::Path;

use crate::result::Result;

/// Version-control queries needed by the release pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Identifier of the commit HEAD points at.
    fn head_commit(&self) -> Result<String>;
    /// Tag names pointing exactly at `sha`, sorted by name.
    fn tags_pointing_at(&self, sha: &str) -> Result<Vec<String>>;
}

/// Git repository opened from a working directory.
pub struct Repository {
    repo: git2::Repository,
}

impl Repository {
    /// Open the repository containing `path`, searching parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path).wrap_err_with(|| {
            format!("failed to open git repository at {}", path.display())
        })?;

        Ok(Self { repo })
    }

    /// Commit a tag ultimately refers to, peeling annotated tags.
    fn tag_target(&self, name: &str) -> Option<Oid> {
        let refname = format!("refs/tags/{name}");

        match self
            .repo
            .revparse_single(&refname)
            .and_then(|obj| obj.peel_to_commit())
        {
            Ok(commit) => Some(commit.id()),
            Err(err) => {
                // tags on trees or blobs can't point at a commit
                debug!("ignoring tag {name}: {}", err.message());
                None
            }
        }
    }
}

impl Vcs for Repository {
    fn head_commit(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .wrap_err("failed to resolve current commit")?;

        Ok(head.id().to_string())
    }

    fn tags_pointing_at(&self, sha: &str) -> Result<Vec<String>> {
        let target = Oid::from_str(sha)
            .wrap_err_with(|| format!("invalid commit id: {sha}"))?;

        let names = self.repo.tag_names(None).wrap_err("failed to list tags")?;

        let mut tags = names
            .iter()
            .flatten()
            .filter(|name| self.tag_target(name) == Some(target))
            .map(|name| name.to_string())
            .collect::<Vec<String>>();

        tags.sort();

        Ok(tags)
    }
}
