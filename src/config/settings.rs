use super::ConfigError;
use crate::workflow::{QuizStatus, WorkflowLimits};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";
pub const DEFAULT_GENERATE_PATH: &str = "/admin/quizzes/bulk/generate";
pub const DEFAULT_SAVE_PATH: &str = "/admin/quizzes/bulk/save";
pub const DEFAULT_FALLBACK_REDIRECT: &str = "/admin/quizzes";
pub const DEFAULT_NOTICE_SECONDS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 120;
pub const API_BASE_ENV: &str = "BULKQUIZ_API_BASE";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_generate_path() -> String {
    DEFAULT_GENERATE_PATH.to_string()
}

fn default_save_path() -> String {
    DEFAULT_SAVE_PATH.to_string()
}

fn default_fallback_redirect() -> String {
    DEFAULT_FALLBACK_REDIRECT.to_string()
}

fn default_notice_seconds() -> u64 {
    DEFAULT_NOTICE_SECONDS
}

fn default_request_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_generate_path")]
    pub generate_path: String,
    #[serde(default = "default_save_path")]
    pub save_path: String,
    #[serde(default = "default_fallback_redirect")]
    pub fallback_redirect: String,
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub default_status: QuizStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_path: Option<PathBuf>,
    #[serde(default)]
    pub limits: WorkflowLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            generate_path: default_generate_path(),
            save_path: default_save_path(),
            fallback_redirect: default_fallback_redirect(),
            notice_seconds: default_notice_seconds(),
            request_timeout_seconds: default_request_timeout_seconds(),
            default_status: QuizStatus::default(),
            log_path: None,
            categories_path: None,
            limits: WorkflowLimits::default(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `BULKQUIZ_API_BASE` when it is set to a non-blank value.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(api_base) = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            self.api_base = api_base;
        }
        self
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let api_base = self.api_base.trim();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "`api_base` must start with http:// or https://".to_string(),
            ));
        }
        for (field, value) in [
            ("generate_path", &self.generate_path),
            ("save_path", &self.save_path),
            ("fallback_redirect", &self.fallback_redirect),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "`{field}` must be non-empty"
                )));
            }
        }
        if self.notice_seconds == 0 {
            return Err(ConfigError::Invalid(
                "`notice_seconds` must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "`request_timeout_seconds` must be greater than zero".to_string(),
            ));
        }
        self.limits.validate().map_err(ConfigError::Invalid)
    }
}
