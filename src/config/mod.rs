#[allow(clippy::module_inception)]
mod config;

pub use config::{config_path, load_config_from, resolve_credentials, save_config_to, Config};
