//! CLI argument parsing and forge configuration.
use clap::Parser;
use color_eyre::eyre::eyre;
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    forge::config::{DEFAULT_GITHUB_API_URL, RemoteConfig},
    result::Result,
};

/// Publish GitHub releases for package@version tags on the current commit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "")]
    /// GitHub repository as a URL (https://github.com/owner/repo) or
    /// owner/repo. Falls back to GITHUB_REPOSITORY env var.
    pub github_repo: String,

    #[arg(long, default_value = "")]
    /// GitHub access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = "")]
    /// GitHub API base URL. Falls back to GITHUB_API_URL env var.
    pub github_api_url: String,

    #[arg(long, default_value = ".")]
    /// Repository root containing the workspace package.json.
    pub root: PathBuf,

    #[arg(long, default_value_t = false)]
    /// Log the releases that would be created without calling the API.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Configure remote repository connection from CLI arguments and the
    /// process environment.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        self.resolve_remote(|key| env::var(key).ok())
    }

    fn resolve_remote(
        &self,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<RemoteConfig> {
        let mut repo = self.github_repo.clone();

        if repo.is_empty()
            && let Some(env_repo) = env_var("GITHUB_REPOSITORY")
        {
            repo = env_repo;
        }

        if repo.is_empty() {
            return Err(eyre!(
                "must set github repo (--github-repo or GITHUB_REPOSITORY)"
            ));
        }

        let parsed = parse_repo(&repo)?;

        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Some(url_token) = parsed.token.clone()
        {
            token = url_token;
        }

        if token.is_empty()
            && let Some(env_var_token) = env_var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(eyre!("must set github token"));
        }

        let mut api_url = self.github_api_url.clone();

        if api_url.is_empty()
            && let Some(env_api_url) = env_var("GITHUB_API_URL")
        {
            api_url = env_api_url;
        }

        if api_url.is_empty() {
            api_url = parsed.api_url.clone();
        }

        Ok(RemoteConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            owner: parsed.owner,
            repo: parsed.name,
            token: SecretString::from(token),
            dry_run: self.dry_run,
        })
    }
}

/// Repository coordinates parsed from `--github-repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedRepo {
    owner: String,
    name: String,
    token: Option<String>,
    api_url: String,
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(eyre!(
            "only http and https schemes are supported for repo urls"
        )),
    }
}

/// Accepts `owner/repo` or a full http(s) repository URL.
fn parse_repo(repo: &str) -> Result<ParsedRepo> {
    if !repo.contains("://") {
        let (owner, name) = repo
            .trim_matches('/')
            .split_once('/')
            .ok_or(eyre!("expected owner/repo, got: {repo}"))?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(eyre!("expected owner/repo, got: {repo}"));
        }

        return Ok(ParsedRepo {
            owner: owner.to_string(),
            name: name.trim_end_matches(".git").to_string(),
            token: None,
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
        });
    }

    let parsed = GitUrl::parse(repo)?;

    validate_scheme(parsed.scheme)?;

    let host = parsed
        .host
        .ok_or(eyre!("unable to parse host from github repo"))?;

    let owner = parsed
        .owner
        .ok_or(eyre!("unable to parse owner from github repo"))?;

    // GitHub Enterprise serves its REST API under /api/v3
    let api_url = if host == "github.com" {
        DEFAULT_GITHUB_API_URL.to_string()
    } else {
        format!("{}://{}/api/v3", parsed.scheme, host)
    };

    Ok(ParsedRepo {
        owner,
        name: parsed.name,
        token: parsed.token,
        api_url,
    })
}
