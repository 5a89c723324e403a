mod r#impl;
mod structs;

pub use r#impl::{
    ConfigSource, DEFAULT_CONFIG_PATH, config_source, get_config, init_config, init_config_from,
};
pub use structs::*;
