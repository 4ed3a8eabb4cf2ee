//! Configuration for the forge platform connection.
use secrecy::SecretString;

/// Public GitHub API endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Remote repository connection configuration for authenticating and
/// interacting with the forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL (e.g., "https://api.github.com").
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Log release requests instead of sending them.
    pub dry_run: bool,
}

impl RemoteConfig {
    /// `owner/repo` path of the repository.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}
