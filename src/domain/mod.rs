pub mod container;
pub mod dashboard;
pub mod image;

pub use container::{Container, ContainerId, ContainerState};
pub use dashboard::Dashboard;
pub use image::Image;
