pub mod constants;
pub mod generator;
pub mod interfaces;
pub mod kv;
pub mod models;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main entry points for easier access
pub use generator::{ClashBuilders, ClashConfig, GenerateError, SubDocumentBuilder};
pub use interfaces::{get_cl_normal_config, get_cl_warp_config, ClashDocument};
pub use settings::Settings;
