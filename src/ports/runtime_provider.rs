use async_trait::async_trait;

use super::{CallContext, RuntimeResult};
use crate::domain::{Container, Dashboard, Image};

/// Port for querying and controlling container runtime state
#[async_trait]
pub trait RuntimeProvider: Send + Sync {
    /// Short backend name used in logs and the health endpoint
    fn backend(&self) -> &'static str;

    /// Aggregate counts, computed from a fresh listing
    async fn dashboard(&self, ctx: &CallContext) -> RuntimeResult<Dashboard>;

    /// List all containers (running and exited)
    async fn list_containers(&self, ctx: &CallContext) -> RuntimeResult<Vec<Container>>;

    /// List all images
    async fn list_images(&self, ctx: &CallContext) -> RuntimeResult<Vec<Image>>;

    async fn start_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()>;

    async fn stop_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()>;

    async fn restart_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()>;
}
