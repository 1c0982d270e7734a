pub mod context;
pub mod error;
pub mod runtime_provider;

pub use context::CallContext;
pub use error::{validate_container_id, RuntimeError, RuntimeResult};
pub use runtime_provider::RuntimeProvider;
