pub mod container;
pub mod controller;
pub mod router;

pub use container::{load_env_file, Container, ContainerConfig};
pub use router::Router;
