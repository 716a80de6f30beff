// Configuration module for duopong
// Handles loading and validating game configuration from a TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config, parse_config};
pub use types::{AIConfig, Config, DisplayConfig, KeyBindings, PhysicsConfig};
