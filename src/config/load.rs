use super::{default_global_config_path, ConfigError, Settings};
use std::path::Path;

/// Loads the global settings file, falling back to defaults when it does not exist.
pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    load_settings_or_default(&path)
}

pub fn load_settings_or_default(path: &Path) -> Result<Settings, ConfigError> {
    let settings = if path.exists() {
        Settings::from_path(path)?
    } else {
        Settings::default()
    };
    let settings = settings.with_env_overrides();
    settings.validate()?;
    Ok(settings)
}
