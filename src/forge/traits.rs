//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{
    error::ForgeResult,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, CreatedRelease},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> ForgeResult<CreatedRelease>;
}
