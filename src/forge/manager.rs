//! Manager that wraps forge implementations
use log::*;

use crate::{
    error::ForgeResult,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, CreatedRelease},
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> ForgeResult<CreatedRelease> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(CreatedRelease {
                id: 0,
                html_url: format!(
                    "https://github.com/{}/releases/tag/{}",
                    self.remote_config.path(),
                    req.tag_name
                ),
            });
        }

        self.forge.create_release(req).await
    }
}
