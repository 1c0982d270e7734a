use thiserror::Error;

/// Errors surfaced by a runtime provider.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine process could not be started, exited non-zero, or was
    /// interrupted by its call context.
    #[error("{command} failed: {reason} ({output})")]
    Invocation {
        command: String,
        reason: String,
        output: String,
    },

    #[error("parse {what} output: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Validation(String),

    #[error("container not found: {0}")]
    NotFound(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Reject blank identifiers before anything touches the engine
pub fn validate_container_id(id: &str) -> RuntimeResult<()> {
    if id.trim().is_empty() {
        return Err(RuntimeError::Validation("container id is required".to_string()));
    }
    Ok(())
}
