use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const WORKFLOW_LOG_RELATIVE_PATH: &str = "logs/workflow.log";

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub fn workflow_log_path(state_root: &Path) -> PathBuf {
    state_root.join(WORKFLOW_LOG_RELATIVE_PATH)
}

/// Append-only JSON line sink. Write failures are swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowLog {
    path: Option<PathBuf>,
}

impl WorkflowLog {
    pub fn to_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append("info", event, message);
    }

    pub fn warn(&self, event: &str, message: &str) {
        self.append("warn", event, message);
    }

    pub fn append(&self, level: &str, event: &str, message: &str) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        append_workflow_log(path, level, event, message);
    }
}

pub fn append_workflow_log(path: &Path, level: &str, event: &str, message: &str) {
    let payload = serde_json::json!({
        "timestamp": now_secs(),
        "level": level,
        "event": event,
        "message": message,
    });

    let Ok(line) = serde_json::to_string(&payload) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn append_writes_one_json_object_per_line() {
        let temp = tempdir().expect("tempdir");
        let log = WorkflowLog::to_path(workflow_log_path(temp.path()));
        log.info("generate_requested", "rows=2 total=8");
        log.warn("generate_failed", "communication error");

        let body = fs::read_to_string(temp.path().join("logs/workflow.log")).expect("read log");
        let lines: Vec<serde_json::Value> = body
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "generate_requested");
        assert_eq!(lines[1]["level"], "warn");
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = WorkflowLog::disabled();
        log.info("phase_changed", "config -> review");
        assert!(log.path().is_none());
    }
}
