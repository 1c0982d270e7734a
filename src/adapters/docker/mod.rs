mod binary;
mod client;
mod parser;

pub use binary::resolve_binary;
pub use client::DockerAdapter;
