pub mod error;
pub mod load;
pub mod paths;
pub mod save;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_global_settings, load_settings_or_default};
pub use paths::{
    default_global_config_path, default_state_root, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use save::{init_settings, save_settings};
pub use settings::{
    Settings, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_FALLBACK_REDIRECT, DEFAULT_GENERATE_PATH,
    DEFAULT_NOTICE_SECONDS, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SAVE_PATH,
};
