pub mod runtime;

pub use runtime::RuntimeService;
