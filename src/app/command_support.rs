use crate::app::session::WorkflowSession;
use crate::catalog::CategoryCatalog;
use crate::client::HttpBulkQuizApi;
use crate::config::{
    default_global_config_path, default_state_root, load_settings_or_default, ConfigError,
    Settings,
};
use crate::shared::logging::{workflow_log_path, WorkflowLog};
use crate::workflow::{QuizStatus, WorkflowController, WorkflowOptions};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub const CONFIG_FLAG: &str = "--config";
pub const CATEGORIES_FLAG: &str = "--categories";
pub const RELEASE_DATE_FLAG: &str = "--release-date";
pub const STATUS_FLAG: &str = "--status";

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

/// Parsed `--flag value`, `--flag=value` and `--switch` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFlags {
    values: BTreeMap<String, Vec<String>>,
    switches: BTreeSet<String>,
    positionals: Vec<String>,
}

impl CommandFlags {
    /// Last value given for `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.contains(name)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

pub fn parse_flags(
    args: &[String],
    value_flags: &[&str],
    switch_flags: &[&str],
) -> Result<CommandFlags, String> {
    let mut flags = CommandFlags::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            flags.positionals.push(arg.clone());
            continue;
        }
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (arg.as_str(), None),
        };
        if switch_flags.contains(&name) {
            if inline.is_some() {
                return Err(format!("option `{name}` does not take a value"));
            }
            flags.switches.insert(name.to_string());
        } else if value_flags.contains(&name) {
            let value = match inline {
                Some(value) => value,
                None => iter
                    .next()
                    .cloned()
                    .ok_or_else(|| format!("option `{name}` requires a value"))?,
            };
            flags
                .values
                .entry(name.to_string())
                .or_default()
                .push(value);
        } else {
            return Err(format!("unknown option `{name}`"));
        }
    }
    Ok(flags)
}

pub fn resolve_config_path(flags: &CommandFlags) -> Result<PathBuf, String> {
    match flags.value(CONFIG_FLAG) {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_global_config_path().map_err(map_config_err),
    }
}

pub fn load_settings(flags: &CommandFlags) -> Result<Settings, String> {
    let path = resolve_config_path(flags)?;
    load_settings_or_default(&path).map_err(map_config_err)
}

pub fn load_catalog(flags: &CommandFlags, settings: &Settings) -> Result<CategoryCatalog, String> {
    let path = flags
        .value(CATEGORIES_FLAG)
        .map(PathBuf::from)
        .or_else(|| settings.categories_path.clone())
        .ok_or_else(|| {
            "no category file: pass --categories <file> or set categories_path in config"
                .to_string()
        })?;
    CategoryCatalog::from_path(&path).map_err(|e| e.to_string())
}

/// Log sink from settings, falling back to the state root. Logging is off
/// when neither resolves.
pub fn workflow_log(settings: &Settings) -> WorkflowLog {
    if let Some(path) = &settings.log_path {
        return WorkflowLog::to_path(path.clone());
    }
    match default_state_root() {
        Ok(root) => WorkflowLog::to_path(workflow_log_path(&root)),
        Err(_) => WorkflowLog::disabled(),
    }
}

pub fn build_controller(
    flags: &CommandFlags,
    settings: &Settings,
    catalog: CategoryCatalog,
) -> Result<WorkflowController, String> {
    let mut options = WorkflowOptions::from_settings(settings);
    if let Some(date) = flags.value(RELEASE_DATE_FLAG) {
        options.release_date = date.trim().to_string();
    }
    if let Some(raw) = flags.value(STATUS_FLAG) {
        options.status =
            QuizStatus::parse(raw).map_err(|err| format!("invalid status `{raw}`: {err}"))?;
    }
    Ok(WorkflowController::new(catalog, options))
}

pub fn build_session(flags: &CommandFlags) -> Result<WorkflowSession<HttpBulkQuizApi>, String> {
    let settings = load_settings(flags)?;
    let catalog = load_catalog(flags, &settings)?;
    let controller = build_controller(flags, &settings, catalog)?;
    let log = workflow_log(&settings);
    log.info(
        "session_started",
        &format!(
            "api_base={} categories={}",
            settings.api_base,
            controller.catalog().len()
        ),
    );
    Ok(WorkflowSession::new(
        controller,
        Arc::new(HttpBulkQuizApi::from_settings(&settings)),
        &settings.fallback_redirect,
        log,
    ))
}

/// `key=value` lines describing where a session ended up.
pub fn workflow_summary_lines(controller: &WorkflowController) -> Vec<String> {
    let summary = controller.rows().summary();
    let mut lines = vec![
        format!("phase={}", controller.phase()),
        format!("rows={}", controller.rows().len()),
        format!("selected_categories={}", summary.selected_categories),
        format!("total_count={}", summary.total_count),
        format!("release_date={}", controller.release_date()),
        format!("status={}", controller.status()),
        format!("review_count={}", controller.review().len()),
    ];
    if let Some(target) = controller.exit_target() {
        lines.push(format!("redirect={target}"));
    }
    if let Some(notice) = controller.notice(Instant::now()) {
        lines.push(format!("notice={}", notice.message));
    }
    lines
}
