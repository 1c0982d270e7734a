use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::docker::resolve_binary;
use crate::adapters::{DockerAdapter, SimulatedAdapter};
use crate::config::EngineConfig;
use crate::domain::{Container, Dashboard, Image};
use crate::ports::{CallContext, RuntimeProvider, RuntimeResult};

/// Main application service for runtime state.
///
/// Holds exactly one provider for its whole lifetime; there is no
/// re-probing or switching once constructed.
#[derive(Clone)]
pub struct RuntimeService {
    provider: Arc<dyn RuntimeProvider>,
}

impl RuntimeService {
    pub fn new(provider: Arc<dyn RuntimeProvider>) -> Self {
        Self { provider }
    }

    /// Pick the live engine if it answers a version probe, otherwise fall
    /// back to the simulated backend. Never fails.
    pub async fn detect(config: &EngineConfig) -> Self {
        Self::new(select_provider(config).await)
    }

    pub fn backend(&self) -> &'static str {
        self.provider.backend()
    }

    pub async fn dashboard(&self, ctx: &CallContext) -> RuntimeResult<Dashboard> {
        self.provider.dashboard(ctx).await
    }

    pub async fn list_containers(&self, ctx: &CallContext) -> RuntimeResult<Vec<Container>> {
        self.provider.list_containers(ctx).await
    }

    pub async fn list_images(&self, ctx: &CallContext) -> RuntimeResult<Vec<Image>> {
        self.provider.list_images(ctx).await
    }

    pub async fn start_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.provider.start_container(ctx, id).await
    }

    pub async fn stop_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.provider.stop_container(ctx, id).await
    }

    pub async fn restart_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.provider.restart_container(ctx, id).await
    }
}

async fn select_provider(config: &EngineConfig) -> Arc<dyn RuntimeProvider> {
    if config.simulate {
        info!("Simulated backend forced by configuration");
        return Arc::new(SimulatedAdapter::new());
    }

    let Some(binary) = resolve_binary(&config.binary) else {
        warn!("⚠ {} CLI unavailable, using simulator data", config.binary);
        return Arc::new(SimulatedAdapter::new());
    };

    let adapter = DockerAdapter::new(binary);
    let ctx = CallContext::with_timeout(config.probe_timeout);
    match adapter.probe(&ctx).await {
        Ok(version) => {
            info!("✓ Connected to engine {} (server {})", adapter.binary().display(), version);
            Arc::new(adapter)
        }
        Err(e) => {
            warn!("⚠ Engine probe failed: {}. Using simulator data.", e);
            Arc::new(SimulatedAdapter::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::ports::RuntimeError;

    /// Records every call and answers with canned data
    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingProvider {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl RuntimeProvider for RecordingProvider {
        fn backend(&self) -> &'static str {
            "recording"
        }

        async fn dashboard(&self, _ctx: &CallContext) -> RuntimeResult<Dashboard> {
            self.record("dashboard".to_string());
            Ok(Dashboard::summarize(&[], 7, false))
        }

        async fn list_containers(&self, _ctx: &CallContext) -> RuntimeResult<Vec<Container>> {
            self.record("list_containers".to_string());
            Ok(Vec::new())
        }

        async fn list_images(&self, _ctx: &CallContext) -> RuntimeResult<Vec<Image>> {
            self.record("list_images".to_string());
            Ok(vec![Image::new("abc", "busybox:latest", 4)])
        }

        async fn start_container(&self, _ctx: &CallContext, id: &str) -> RuntimeResult<()> {
            self.record(format!("start {}", id));
            Ok(())
        }

        async fn stop_container(&self, _ctx: &CallContext, id: &str) -> RuntimeResult<()> {
            self.record(format!("stop {}", id));
            Err(RuntimeError::NotFound(id.to_string()))
        }

        async fn restart_container(&self, _ctx: &CallContext, id: &str) -> RuntimeResult<()> {
            self.record(format!("restart {}", id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_forwards_to_injected_provider() {
        let provider = Arc::new(RecordingProvider::default());
        let service = RuntimeService::new(provider.clone());
        let ctx = CallContext::background();

        assert_eq!(service.backend(), "recording");
        assert_eq!(service.dashboard(&ctx).await.unwrap().images_total, 7);
        assert!(service.list_containers(&ctx).await.unwrap().is_empty());
        assert_eq!(service.list_images(&ctx).await.unwrap().len(), 1);
        service.start_container(&ctx, "a").await.unwrap();
        let err = service.stop_container(&ctx, "b").await.unwrap_err();
        assert!(matches!(err, RuntimeError::NotFound(_)));
        service.restart_container(&ctx, "c").await.unwrap();

        let calls = provider.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec!["dashboard", "list_containers", "list_images", "start a", "stop b", "restart c"]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_selects_simulated() {
        let config = EngineConfig {
            binary: "dockpanel-no-such-engine-binary".to_string(),
            ..EngineConfig::default()
        };

        let service = RuntimeService::detect(&config).await;
        assert_eq!(service.backend(), "simulated");

        let ctx = CallContext::background();
        for _ in 0..3 {
            assert!(service.dashboard(&ctx).await.unwrap().simulated);
        }
    }

    #[tokio::test]
    async fn test_forced_simulation() {
        let config = EngineConfig {
            simulate: true,
            ..EngineConfig::default()
        };

        let service = RuntimeService::detect(&config).await;
        assert_eq!(service.backend(), "simulated");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_probe_selects_simulated() {
        let dir = tempfile::tempdir().unwrap();
        let binary = crate::test_support::fake_engine(
            dir.path(),
            "echo 'Cannot connect to the Docker daemon' >&2; exit 1",
        );
        let config = EngineConfig {
            binary: binary.to_string_lossy().into_owned(),
            ..EngineConfig::default()
        };

        let service = RuntimeService::detect(&config).await;
        assert_eq!(service.backend(), "simulated");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hanging_probe_times_out_to_simulated() {
        let dir = tempfile::tempdir().unwrap();
        let binary = crate::test_support::fake_engine(dir.path(), "exec sleep 30");
        let config = EngineConfig {
            binary: binary.to_string_lossy().into_owned(),
            probe_timeout: Duration::from_millis(200),
            simulate: false,
        };

        let started = std::time::Instant::now();
        let service = RuntimeService::detect(&config).await;
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(service.backend(), "simulated");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_healthy_engine_selects_docker() {
        let dir = tempfile::tempdir().unwrap();
        let binary = crate::test_support::fake_engine(
            dir.path(),
            r#"case "$1" in version) echo 27.3.1 ;; *) exit 0 ;; esac"#,
        );
        let config = EngineConfig {
            binary: binary.to_string_lossy().into_owned(),
            ..EngineConfig::default()
        };

        let service = RuntimeService::detect(&config).await;
        assert_eq!(service.backend(), "docker");

        let dashboard = service.dashboard(&CallContext::background()).await.unwrap();
        assert!(!dashboard.simulated);
        assert_eq!(dashboard.containers_total, 0);
    }
}
