use std::path::PathBuf;

/// Failures while locating, reading or writing `config.yaml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOME is not set; pass --config <file>")]
    NoHome,
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config {} is not valid yaml: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("cannot render settings as yaml: {0}")]
    Encode(#[source] serde_yaml::Error),
    #[error("cannot write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config {} already exists", path.display())]
    AlreadyExists { path: PathBuf },
}
