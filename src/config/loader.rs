// Configuration file loading and creation

use super::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("duopong");
    path.push("config.toml");
    path
}

/// Load configuration from `path`, creating it with defaults if missing.
///
/// A file that fails to parse or validate is logged and replaced by defaults
/// in memory; the file on disk is left alone so the user can fix it.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        create_default_config(path)?;
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    match parse_config(&contents) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Ok(Config::default())
        }
    }
}

/// Parse and validate a TOML document.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("parsing config TOML")?;
    config.validate()?;
    Ok(config)
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating config directory {}", dir.display()))?;
    }

    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).context("serializing default config")?;

    let commented_toml = format!(
        "# duopong configuration file\n\
         # Edit this file to customize game behavior\n\
         # Restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"W\", \"S\", \"Q\"\n\
         #\n\
         # Physics speeds are in field units per tick (60 ticks per second)\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)
        .with_context(|| format!("writing default config to {}", path.display()))?;
    tracing::info!(path = %path.display(), "created default config");
    Ok(())
}
