//! Settings module
//!
//! Settings are loaded once from a YAML or TOML file and handed to the
//! generator by reference; nothing in the generation path reads global state.

pub mod file_settings;
pub mod settings_struct;

use thiserror::Error;

pub use file_settings::FileSettings;
pub use settings_struct::Settings;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
