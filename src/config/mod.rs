//! State file loading.

mod loader;
mod types;

pub use loader::{ConfigError, FileFormat};
pub use types::StateFile;
