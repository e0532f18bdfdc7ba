use bulkquiz::app::session::{RequestCompletion, WorkflowSession};
use bulkquiz::catalog::CategoryCatalog;
use bulkquiz::client::{
    ApiEnvelope, BulkQuizApi, GenerateData, GenerateRequest, SaveData, SaveRequest,
    TransportError,
};
use bulkquiz::shared::logging::WorkflowLog;
use bulkquiz::workflow::{CompletionOutcome, Phase, WorkflowController, WorkflowOptions};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[derive(Default)]
struct ScriptedApi {
    generate_replies: Mutex<VecDeque<Value>>,
    save_replies: Mutex<VecDeque<Value>>,
    save_requests: Mutex<Vec<SaveRequest>>,
}

impl ScriptedApi {
    fn with_generate(self, reply: Value) -> Self {
        self.generate_replies
            .lock()
            .expect("lock")
            .push_back(reply);
        self
    }

    fn with_save(self, reply: Value) -> Self {
        self.save_replies.lock().expect("lock").push_back(reply);
        self
    }
}

impl BulkQuizApi for ScriptedApi {
    fn post_generate(
        &self,
        _request: &GenerateRequest,
    ) -> Result<ApiEnvelope<GenerateData>, TransportError> {
        let reply = self
            .generate_replies
            .lock()
            .expect("lock")
            .pop_front()
            .expect("scripted generate reply");
        Ok(serde_json::from_value(reply).expect("generate envelope"))
    }

    fn post_save(&self, request: &SaveRequest) -> Result<ApiEnvelope<SaveData>, TransportError> {
        self.save_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        let reply = self
            .save_replies
            .lock()
            .expect("lock")
            .pop_front()
            .expect("scripted save reply");
        Ok(serde_json::from_value(reply).expect("save envelope"))
    }
}

fn two_quizzes() -> Value {
    json!({"success": true, "data": {"quizzes": [
        {"category_id": "math", "category_name": "Math", "title": "Primes"},
        {"category_id": "math", "category_name": "Math", "title": "Fractions"}
    ]}})
}

fn session_with(api: ScriptedApi, log_path: &Path) -> WorkflowSession<ScriptedApi> {
    let catalog =
        CategoryCatalog::from_json_str(r#"[{"id":"math","name":"Math"}]"#).expect("catalog");
    let mut controller = WorkflowController::new(
        catalog,
        WorkflowOptions {
            release_date: "2024-06-01".to_string(),
            ..WorkflowOptions::default()
        },
    );
    let row = controller.rows().id_at(0).expect("row");
    controller.set_category_input(row, "math").expect("math");
    WorkflowSession::new(
        controller,
        Arc::new(api),
        "/admin/quizzes",
        WorkflowLog::to_path(log_path.to_path_buf()),
    )
}

fn logged_events(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read log")
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).expect("json log line");
            value["event"].as_str().expect("event").to_string()
        })
        .collect()
}

#[test]
fn generate_then_save_logs_each_step() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("logs/workflow.log");
    let api = ScriptedApi::default()
        .with_generate(two_quizzes())
        .with_save(json!({"success": true, "data": {"redirect_url": "/admin/quizzes?batch=1", "created_count": 2}}));
    let mut session = session_with(api, &log_path);
    let now = Instant::now();

    assert_eq!(
        session.generate_now(now).expect("generate"),
        CompletionOutcome::Applied
    );
    assert_eq!(session.controller().phase(), Phase::Review);
    assert_eq!(
        session.save_now(now).expect("save"),
        CompletionOutcome::Applied
    );
    assert_eq!(
        session.last_receipt().and_then(|receipt| receipt.created_count),
        Some(2)
    );
    assert_eq!(
        session.controller().exit_target().map(|t| t.as_str()),
        Some("/admin/quizzes?batch=1")
    );

    assert_eq!(
        logged_events(&log_path),
        vec![
            "generate_requested",
            "generate_succeeded",
            "phase_changed",
            "save_requested",
            "save_succeeded",
        ]
    );
}

#[test]
fn validation_failure_is_logged_without_a_request() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("workflow.log");
    let mut session = session_with(ScriptedApi::default(), &log_path);
    session.controller_mut().set_release_date("").expect("clear date");

    assert!(session.generate_now(Instant::now()).is_err());
    assert_eq!(logged_events(&log_path), vec!["validation_failed"]);
}

#[test]
fn failed_generation_is_logged_as_failure() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("workflow.log");
    let api = ScriptedApi::default().with_generate(json!({"success": false, "error": "quota"}));
    let mut session = session_with(api, &log_path);

    assert_eq!(
        session.generate_now(Instant::now()).expect("request ran"),
        CompletionOutcome::Failed("quota".to_string())
    );
    assert_eq!(
        logged_events(&log_path),
        vec!["generate_requested", "generate_failed"]
    );
}

#[test]
fn spawned_generation_reports_through_channel() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("workflow.log");
    let api = ScriptedApi::default().with_generate(two_quizzes());
    let mut session = session_with(api, &log_path);
    let (tx, rx) = mpsc::channel();

    let pending = session.start_generation(Instant::now()).expect("start");
    assert!(session.controller().generation_in_flight());
    session
        .spawn_generation(pending, tx)
        .join()
        .expect("join worker");

    let completion = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("completion");
    assert!(matches!(completion, RequestCompletion::Generation(_, Ok(_))));
    assert_eq!(
        session.apply_completion(completion, Instant::now()),
        CompletionOutcome::Applied
    );
    assert_eq!(session.controller().review().len(), 2);
}

#[test]
fn removing_last_item_logs_phase_change_back_to_config() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("workflow.log");
    let api = ScriptedApi::default().with_generate(json!({"success": true, "data": {"quizzes": [
        {"category_id": "math", "title": "Only"}
    ]}}));
    let mut session = session_with(api, &log_path);
    session.generate_now(Instant::now()).expect("generate");
    session.remove_review_item(0).expect("remove");

    assert_eq!(session.controller().phase(), Phase::Config);
    let events = logged_events(&log_path);
    assert_eq!(
        &events[events.len() - 2..],
        ["review_item_removed", "phase_changed"]
    );
}

#[test]
fn disabled_log_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let catalog =
        CategoryCatalog::from_json_str(r#"[{"id":"math","name":"Math"}]"#).expect("catalog");
    let mut session = WorkflowSession::new(
        WorkflowController::new(catalog, WorkflowOptions::default()),
        Arc::new(ScriptedApi::default()),
        "/admin/quizzes",
        WorkflowLog::disabled(),
    );
    assert!(session.generate_now(Instant::now()).is_err());
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
}
