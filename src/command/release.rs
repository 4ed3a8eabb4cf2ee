//! Release publication for `package@version` tags on the current commit.
use log::*;
use std::path::Path;

use crate::{
    changelog,
    cli,
    forge::{
        github::Github, manager::ForgeManager, request::CreateReleaseRequest,
    },
    repo::{Repository, Vcs},
    result::Result,
    tag::PackageTag,
    workspace::{PackageRecord, Workspace},
};

/// What happened to a single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Created { url: String },
    AlreadyExists,
    Skipped,
    Failed,
}

/// Tags grouped by outcome, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub created: Vec<String>,
    pub already_existed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl ReleaseSummary {
    fn record(&mut self, tag: &str, outcome: TagOutcome) {
        let bucket = match outcome {
            TagOutcome::Created { .. } => &mut self.created,
            TagOutcome::AlreadyExists => &mut self.already_existed,
            TagOutcome::Skipped => &mut self.skipped,
            TagOutcome::Failed => &mut self.failed,
        };
        bucket.push(tag.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.already_existed.is_empty()
            && self.skipped.is_empty()
            && self.failed.is_empty()
    }
}

/// Execute release command: publish a release for every package tag on
/// HEAD.
pub async fn execute(args: &cli::Args) -> Result<()> {
    let remote = args.get_remote()?;
    let forge = Github::new(remote)?;
    let manager = ForgeManager::new(Box::new(forge));
    let repo = Repository::open(&args.root)?;

    let summary = publish_tagged_releases(&repo, &args.root, &manager).await?;

    if !summary.is_empty() {
        info!(
            "done: {} created, {} already existed, {} skipped, {} failed",
            summary.created.len(),
            summary.already_existed.len(),
            summary.skipped.len(),
            summary.failed.len()
        );
    }

    Ok(())
}

/// Publish releases for the tags pointing at the current commit.
///
/// Errors are returned only for failures that affect the whole run:
/// resolving HEAD or listing tags, and loading the root manifest. Every
/// per-tag problem is logged and recorded in the summary.
pub async fn publish_tagged_releases(
    vcs: &dyn Vcs,
    root: &Path,
    forge: &ForgeManager,
) -> Result<ReleaseSummary> {
    let sha = vcs.head_commit()?;
    let tags = vcs.tags_pointing_at(&sha)?;

    let mut summary = ReleaseSummary::default();

    if tags.is_empty() {
        info!("no tags found on commit {sha}: nothing to release");
        return Ok(summary);
    }

    info!("found {} tag(s) on commit {sha}", tags.len());

    let workspace = Workspace::load(root)?;

    for tag in tags.iter() {
        let outcome = publish_tag(&workspace, forge, tag).await;
        summary.record(tag, outcome);
    }

    Ok(summary)
}

async fn publish_tag(
    workspace: &Workspace,
    forge: &ForgeManager,
    tag: &str,
) -> TagOutcome {
    let Some(parsed) = PackageTag::parse(tag) else {
        info!("skipping tag {tag}: not in package@version format");
        return TagOutcome::Skipped;
    };

    let Some(package) = workspace.find_package(&parsed) else {
        warn!(
            "no workspace package found for {} version {}: skipping",
            parsed.name, parsed.version
        );
        return TagOutcome::Skipped;
    };

    let notes = match release_notes(&package) {
        Ok(notes) => notes,
        Err(err) => {
            error!("failed to build release notes for {tag}: {err:#}");
            return TagOutcome::Failed;
        }
    };

    let req = CreateReleaseRequest {
        tag_name: tag.to_string(),
        name: parsed.title(),
        body: notes,
        draft: false,
        prerelease: parsed.is_prerelease(),
    };

    info!("creating release: {}", req.name);

    match forge.create_release(req).await {
        Ok(release) => {
            info!("created release {tag}: {}", release.html_url);
            TagOutcome::Created {
                url: release.html_url,
            }
        }
        Err(err) if err.is_conflict() => {
            warn!("release for {tag} already exists: skipping");
            TagOutcome::AlreadyExists
        }
        Err(err) => {
            error!("failed to create release for {tag}: {err}");
            TagOutcome::Failed
        }
    }
}

/// Notes from the package's CHANGELOG.md, or a generic line when the
/// package has no changelog.
fn release_notes(package: &PackageRecord) -> Result<String> {
    let changelog_path = package.changelog_path();

    if !changelog_path.exists() {
        debug!("no changelog at {}", changelog_path.display());
        return Ok(format!(
            "Release {} of {}",
            package.version, package.name
        ));
    }

    changelog::extract_notes_from_file(&changelog_path, &package.version)
}
