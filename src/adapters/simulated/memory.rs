use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::{Container, ContainerId, ContainerState, Dashboard, Image};
use crate::ports::{CallContext, RuntimeError, RuntimeProvider, RuntimeResult};

const HOUR: i64 = 3600;

#[derive(Debug, Clone)]
struct Snapshot {
    containers: Vec<Container>,
    images: Vec<Image>,
}

impl Snapshot {
    /// Fixed demo data, stamped relative to `now`
    fn seed(now: i64) -> Self {
        let containers = vec![
            Container::new(
                ContainerId::new("9df8a4a8ce2a"),
                "traefik-proxy".to_string(),
                "traefik:v3".to_string(),
                ContainerState::Running,
            )
            .with_status("Up 3 hours")
            .with_command("traefik --api.insecure=true"),
            Container::new(
                ContainerId::new("f41c8f4b7a9d"),
                "postgres-db".to_string(),
                "postgres:16".to_string(),
                ContainerState::Running,
            )
            .with_status("Up 1 day")
            .with_command("docker-entrypoint.sh postgres"),
            Container::new(
                ContainerId::new("52c0c9150e4f"),
                "redis-cache".to_string(),
                "redis:7".to_string(),
                ContainerState::Exited,
            )
            .with_status("Exited (0) 2 hours ago")
            .with_command("redis-server"),
        ];

        let images = vec![
            Image::new("1a8d3c5e7f90", "traefik:v3", 142).with_created(now - 48 * HOUR),
            Image::new("8c42b61d0e3a", "postgres:16", 386).with_created(now - 72 * HOUR),
            Image::new("9f20e4a7c15b", "redis:7", 114).with_created(now - 24 * HOUR),
        ];

        Self { containers, images }
    }

    fn find_mut(&mut self, id: &str) -> RuntimeResult<&mut Container> {
        self.containers
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))
    }
}

/// In-memory stand-in for the engine.
///
/// Every read and mutation goes through one mutex; reads hand out clones.
pub struct SimulatedAdapter {
    snapshot: Mutex<Snapshot>,
}

impl SimulatedAdapter {
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(Snapshot::seed(Utc::now().timestamp())),
        }
    }

    /// A panic while holding the lock cannot leave a half-written container,
    /// so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, id: &str, state: ContainerState, status: &str) -> RuntimeResult<()> {
        let mut snapshot = self.lock();
        let container = snapshot.find_mut(id)?;
        container.transition(state, status);
        debug!(
            "Simulated container {} ({}) is now {:?}",
            container.name,
            container.id.as_str(),
            state
        );
        Ok(())
    }
}

impl Default for SimulatedAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuntimeProvider for SimulatedAdapter {
    fn backend(&self) -> &'static str {
        "simulated"
    }

    async fn dashboard(&self, _ctx: &CallContext) -> RuntimeResult<Dashboard> {
        let snapshot = self.lock();
        Ok(Dashboard::summarize(&snapshot.containers, snapshot.images.len(), true))
    }

    async fn list_containers(&self, _ctx: &CallContext) -> RuntimeResult<Vec<Container>> {
        Ok(self.lock().containers.clone())
    }

    async fn list_images(&self, _ctx: &CallContext) -> RuntimeResult<Vec<Image>> {
        Ok(self.lock().images.clone())
    }

    async fn start_container(&self, _ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.transition(id, ContainerState::Running, "Up just now")
    }

    async fn stop_container(&self, _ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.transition(id, ContainerState::Exited, "Exited (0) just now")
    }

    async fn restart_container(&self, _ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.transition(id, ContainerState::Running, "Up less than a second")
    }
}
