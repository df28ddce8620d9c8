//! Configuration for the orrery application: window, camera, controls,
//! texture sources, and the declarative solar system description.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, CameraConfig, Config, ControlsConfig, DebugConfig, SystemConfig, TextureConfig,
    WindowConfig,
};
pub use error::ConfigError;
