pub mod docker;
pub mod simulated;

pub use docker::DockerAdapter;
pub use simulated::SimulatedAdapter;
