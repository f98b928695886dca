pub mod constants;
pub mod settings;

pub use settings::{ConfigError, PanelConfig, get_global_config, set_global_config};
