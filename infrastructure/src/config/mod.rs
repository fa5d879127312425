//! Configuration file loading for the aios client
//!
//! Sources are merged in this order (later wins):
//!
//! 1. Built-in defaults
//! 2. Global: `$XDG_CONFIG_HOME/aios/config.toml`
//! 3. Project root: `./aios.toml` or `./.aios.toml`
//! 4. `--config <path>` specified file
//! 5. Environment: `AIOS_API_BASE`, then `AIOS_<SECTION>__<KEY>`

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileChatConfig, FileConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use loader::ConfigLoader;
