use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::parser::{parse_containers, parse_images};
use crate::domain::{Container, Dashboard, Image};
use crate::ports::{validate_container_id, CallContext, RuntimeError, RuntimeProvider, RuntimeResult};

/// Docker adapter driving the engine's command-line interface
#[derive(Debug, Clone)]
pub struct DockerAdapter {
    binary: PathBuf,
}

impl DockerAdapter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Liveness check: asks the daemon for its server version
    pub async fn probe(&self, ctx: &CallContext) -> RuntimeResult<String> {
        let version = self
            .output(ctx, &["version", "--format", "{{.Server.Version}}"])
            .await?;
        Ok(version.trim().to_string())
    }

    /// Run the engine and return stdout. Stdout and stderr are both kept
    /// for the error when the command fails.
    async fn output(&self, ctx: &CallContext, args: &[&str]) -> RuntimeResult<String> {
        let command = format!("{} {}", self.binary.display(), args.join(" "));
        let invocation_error = |reason: String, output: String| RuntimeError::Invocation {
            command: command.clone(),
            reason,
            output,
        };

        if let Some(interrupted) = ctx.interrupted() {
            return Err(invocation_error(interrupted.to_string(), String::new()));
        }

        debug!("Running {}", command);

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| invocation_error(e.to_string(), String::new()))?;

        // Dropping the wait future drops the child, which kills it.
        let output = tokio::select! {
            result = child.wait_with_output() => {
                result.map_err(|e| invocation_error(e.to_string(), String::new()))?
            }
            interrupted = ctx.done() => {
                warn!("{} interrupted: {}", command, interrupted);
                return Err(invocation_error(interrupted.to_string(), String::new()));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let combined = format!("{}{}", stdout, String::from_utf8_lossy(&output.stderr));
            return Err(invocation_error(
                output.status.to_string(),
                combined.trim().to_string(),
            ));
        }

        Ok(stdout)
    }

    async fn container_command(&self, ctx: &CallContext, action: &str, id: &str) -> RuntimeResult<()> {
        validate_container_id(id)?;
        self.output(ctx, &[action, id]).await?;
        Ok(())
    }
}

#[async_trait]
impl RuntimeProvider for DockerAdapter {
    fn backend(&self) -> &'static str {
        "docker"
    }

    async fn dashboard(&self, ctx: &CallContext) -> RuntimeResult<Dashboard> {
        let containers = self.list_containers(ctx).await?;
        let images = self.list_images(ctx).await?;
        Ok(Dashboard::summarize(&containers, images.len(), false))
    }

    async fn list_containers(&self, ctx: &CallContext) -> RuntimeResult<Vec<Container>> {
        let output = self
            .output(ctx, &["ps", "-a", "--no-trunc", "--format", "{{json .}}"])
            .await?;
        parse_containers(&output)
    }

    async fn list_images(&self, ctx: &CallContext) -> RuntimeResult<Vec<Image>> {
        let output = self
            .output(ctx, &["images", "--no-trunc", "--format", "{{json .}}"])
            .await?;
        parse_images(&output)
    }

    async fn start_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.container_command(ctx, "start", id).await
    }

    async fn stop_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.container_command(ctx, "stop", id).await
    }

    async fn restart_container(&self, ctx: &CallContext, id: &str) -> RuntimeResult<()> {
        self.container_command(ctx, "restart", id).await
    }
}
