//! Viewer settings persisted as `config.ron`, with command-line overrides.
//!
//! Every section is `#[serde(default)]`, so partial or older files load and
//! unknown keys are ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, RenderConfig, SimulationConfig,
    WindowConfig,
};
pub use error::ConfigError;
