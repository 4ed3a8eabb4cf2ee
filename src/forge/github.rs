//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;

use crate::{
    error::{ForgeResult, ReleaseError},
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, CreatedRelease},
        traits::Forge,
    },
    result::Result,
};

/// GitHub forge implementation using Octocrab for the releases API.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?;
        let instance = builder.build()?;

        debug!("configured github client for {}", config.path());

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> ForgeResult<CreatedRelease> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag_name)
            .name(&req.name)
            .body(&req.body)
            .draft(req.draft)
            .prerelease(req.prerelease)
            .send()
            .await;

        match result {
            Ok(release) => Ok(CreatedRelease {
                id: release.id.0,
                html_url: release.html_url.to_string(),
            }),
            Err(err) => match ReleaseError::from(err) {
                ReleaseError::AlreadyExists(_) => {
                    Err(ReleaseError::already_exists(req.tag_name))
                }
                err => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_remote_config;

    #[tokio::test]
    async fn builds_client_from_remote_config() {
        let forge = Github::new(create_test_remote_config()).unwrap();
        let config = forge.remote_config();
        assert_eq!(config.path(), "acme/monorepo");
    }

    #[tokio::test]
    async fn rejects_invalid_api_url() {
        let config = RemoteConfig {
            api_url: "not a url".into(),
            ..create_test_remote_config()
        };
        assert!(Github::new(config).is_err());
    }
}
