use bulkquiz::catalog::CategoryCatalog;
use bulkquiz::client::{
    build_generate_request, interpret_generate_envelope, ApiEnvelope, BulkQuizApi,
    GenerateData, GenerateRequest, GenerationClient, GenerationError, SaveData, SaveRequest,
    TransportError,
};
use bulkquiz::workflow::{WorkflowController, WorkflowOptions};
use serde_json::json;
use std::sync::Mutex;
use std::time::Instant;

struct RecordingApi {
    reply: Mutex<Option<Result<ApiEnvelope<GenerateData>, TransportError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl RecordingApi {
    fn replying(reply: Result<ApiEnvelope<GenerateData>, TransportError>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("lock requests").clone()
    }
}

impl BulkQuizApi for RecordingApi {
    fn post_generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<ApiEnvelope<GenerateData>, TransportError> {
        self.requests
            .lock()
            .expect("lock requests")
            .push(request.clone());
        self.reply
            .lock()
            .expect("lock reply")
            .take()
            .expect("one generate reply")
    }

    fn post_save(&self, _request: &SaveRequest) -> Result<ApiEnvelope<SaveData>, TransportError> {
        panic!("generation tests never save");
    }
}

fn envelope(value: serde_json::Value) -> ApiEnvelope<GenerateData> {
    serde_json::from_value(value).expect("envelope")
}

fn math_and_history() -> WorkflowController {
    let catalog = CategoryCatalog::from_json_str(
        r#"[{"id":"math","name":"Math"},{"id":"history","name":"History"}]"#,
    )
    .expect("catalog");
    let mut controller = WorkflowController::new(catalog, WorkflowOptions::default());
    let first = controller.rows().id_at(0).expect("row");
    controller.set_category_input(first, "math").expect("math");
    controller.set_count(first, 5).expect("count");
    let second = controller.add_row().expect("row");
    controller
        .set_category_input(second, "history")
        .expect("history");
    controller.set_count(second, 3).expect("count");
    controller
}

#[test]
fn generate_sends_one_row_per_configuration_row() {
    let mut controller = math_and_history();
    let pending = controller.begin_generation(Instant::now()).expect("begin");
    let api = RecordingApi::replying(Ok(envelope(json!({
        "success": true,
        "data": {"quizzes": [
            {"category_id": "math", "category_name": "Math", "title": "Fractions", "description": "Halves and quarters"},
            {"category_id": "history", "category_name": "History", "title": "Rome", "description": "The republic"}
        ]}
    }))));

    let review = GenerationClient::new(&api)
        .generate(&pending.rows, &pending.catalog)
        .expect("generate");
    assert_eq!(review.len(), 2);
    assert_eq!(review.items()[1].title, "Rome");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        serde_json::to_value(&requests[0]).expect("encode"),
        json!({"rows": [
            {"category_id": "math", "category_name": "Math", "count": 5},
            {"category_id": "history", "category_name": "History", "count": 3}
        ]})
    );
}

#[test]
fn build_request_leaves_unknown_names_blank() {
    let controller = math_and_history();
    let empty = CategoryCatalog::default();
    let request = build_generate_request(controller.rows().rows(), &empty);
    assert_eq!(request.rows[0].category_id, "math");
    assert_eq!(request.rows[0].category_name, "");
}

#[test]
fn server_error_message_is_passed_through() {
    let result = interpret_generate_envelope(envelope(json!({
        "success": false,
        "error": "Daily generation limit reached"
    })));
    assert_eq!(
        result,
        Err(GenerationError::Server(
            "Daily generation limit reached".to_string()
        ))
    );
}

#[test]
fn server_failure_without_message_uses_default_text() {
    for body in [
        json!({"success": false}),
        json!({"success": false, "error": "   "}),
    ] {
        let err = interpret_generate_envelope(envelope(body)).expect_err("failure");
        assert_eq!(err.notice_message(), "Quiz generation failed");
    }
}

#[test]
fn success_without_quizzes_is_empty_generation() {
    for body in [
        json!({"success": true}),
        json!({"success": true, "data": {}}),
        json!({"success": true, "data": {"quizzes": []}}),
        json!({"success": true, "data": {"quizzes": null}}),
    ] {
        assert_eq!(
            interpret_generate_envelope(envelope(body)),
            Err(GenerationError::EmptyGeneration)
        );
    }
}

#[test]
fn transport_failure_maps_to_communication_error() {
    let mut controller = math_and_history();
    let pending = controller.begin_generation(Instant::now()).expect("begin");
    let api = RecordingApi::replying(Err(TransportError::Request {
        url: "http://127.0.0.1:9/admin/quizzes/bulk/generate".to_string(),
        reason: "connection refused".to_string(),
    }));
    let err = GenerationClient::new(&api)
        .generate(&pending.rows, &pending.catalog)
        .expect_err("transport failure");
    assert!(matches!(err, GenerationError::Transport(_)));
    assert_eq!(err.notice_message(), "A communication error occurred");
}
