//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level file names, checked in order
const PROJECT_FILES: [&str; 2] = ["aios.toml", ".aios.toml"];

/// Single variable overriding `backend.base_url`
pub const API_BASE_ENV: &str = "AIOS_API_BASE";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AIOS_API_BASE`, then `AIOS_<SECTION>__<KEY>` variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./aios.toml` or `./.aios.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/aios/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            Self::require_exists(path)?;
            figment = Self::merge_file(figment, path);
        }

        Self::merge_env(figment).extract().map_err(Box::new)
    }

    /// Load a single file over the defaults, skipping every other source.
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Self::require_exists(path)?;
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::merge_file(figment, path).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn merge_file(figment: Figment, path: &Path) -> Figment {
        figment.merge(Toml::file(path))
    }

    /// figment skips missing files silently; an explicit path must exist.
    fn require_exists(path: &Path) -> Result<(), Box<figment::Error>> {
        if path.is_file() {
            Ok(())
        } else {
            Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))))
        }
    }

    fn merge_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed("AIOS_").ignore(&["api_base"]).split("__"))
            .merge(
                Env::raw()
                    .only(&[API_BASE_ENV])
                    .map(|_| "backend.base_url".into()),
            )
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/aios/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aios").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let env_set = std::env::vars().any(|(key, _)| key.starts_with("AIOS_"));
        if env_set {
            println!("  [FOUND] Env:     AIOS_* variables");
        } else {
            println!("  [     ] Env:     AIOS_API_BASE, AIOS_<SECTION>__<KEY>");
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./aios.toml or ./.aios.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
