use super::{ConfigError, Settings};
use std::fs;
use std::io::Write;
use std::path::Path;

fn create_parent_dir(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    settings.validate()?;
    create_parent_dir(path)?;
    let body = serde_yaml::to_string(settings).map_err(ConfigError::Encode)?;
    write_through_temp(path, body.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Readers never observe a half-written settings file.
fn write_through_temp(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("config.yaml");
    let tmp_path = path.with_file_name(format!(".{file_name}.{}.partial", std::process::id()));
    let result = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(body)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Writes default settings, refusing to clobber an existing file.
pub fn init_settings(path: &Path) -> Result<Settings, ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let settings = Settings::default();
    save_settings(&settings, path)?;
    Ok(settings)
}
