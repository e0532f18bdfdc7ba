use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::tempdir;

struct MockAdminServer {
    base_url: String,
    bodies: Arc<Mutex<Vec<(String, String)>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockAdminServer {
    fn start(expected_requests: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let bodies_for_thread = Arc::clone(&bodies);
        let handle = thread::spawn(move || {
            for _ in 0..expected_requests {
                let (mut stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
                let mut request_line = String::new();
                reader.read_line(&mut request_line).expect("request line");
                let path = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();
                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).expect("header");
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    if line.to_ascii_lowercase().starts_with("content-length:") {
                        content_length = line
                            .split_once(':')
                            .map(|(_, v)| v.trim().parse::<usize>().unwrap_or(0))
                            .unwrap_or(0);
                    }
                }
                let mut body = vec![0_u8; content_length];
                reader.read_exact(&mut body).expect("body");
                bodies_for_thread
                    .lock()
                    .expect("lock")
                    .push((path.clone(), String::from_utf8_lossy(&body).to_string()));

                let response_body = if path.ends_with("/generate") {
                    r#"{"success":true,"data":{"quizzes":[{"category_id":"math","category_name":"Math","title":"Primes","description":"Divisors"},{"category_id":"history","category_name":"History","title":"Rome","description":"Republic"}]}}"#
                } else {
                    r#"{"success":true,"data":{"redirect_url":"/admin/quizzes?batch=9","created_count":2}}"#
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                stream.write_all(response.as_bytes()).expect("write");
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            bodies,
            handle: Some(handle),
        }
    }

    fn finish(mut self) -> Vec<(String, String)> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
        self.bodies.lock().expect("lock").clone()
    }
}

fn write_categories(dir: &Path) -> PathBuf {
    let path = dir.join("categories.json");
    fs::write(
        &path,
        r#"[{"id":"math","name":"Math"},{"id":"history","name":"History"}]"#,
    )
    .expect("write categories");
    path
}

fn bulkquiz(home: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bulkquiz"));
    command
        .args(args)
        .env("HOME", home)
        .env_remove("BULKQUIZ_API_BASE")
        .env_remove("BULKQUIZ_SCRIPT_KEYS");
    command
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn help_lists_commands() {
    let dir = tempdir().expect("tempdir");
    let output = bulkquiz(dir.path(), &["help"]).output().expect("run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Commands:"));
    assert!(text.contains("batch --row"));
}

#[test]
fn unknown_command_fails() {
    let dir = tempdir().expect("tempdir");
    let output = bulkquiz(dir.path(), &["launch"]).output().expect("run");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown command `launch`"));
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = tempdir().expect("tempdir");
    let output = bulkquiz(dir.path(), &["config", "init"]).output().expect("run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let config_path = dir.path().join(".bulkquiz/config.yaml");
    assert!(config_path.is_file());
    assert!(stdout(&output).contains(&format!("config={}", config_path.display())));

    let again = bulkquiz(dir.path(), &["config", "init"]).output().expect("run");
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));

    let show = bulkquiz(dir.path(), &["config", "show"]).output().expect("run");
    assert!(show.status.success(), "stderr: {}", stderr(&show));
    let text = stdout(&show);
    assert!(text.contains("exists=true"));
    assert!(text.contains("127.0.0.1:8080"));
    assert!(text.contains("max_total_count: 50"));
}

#[test]
fn categories_lists_catalog() {
    let dir = tempdir().expect("tempdir");
    let categories = write_categories(dir.path());
    let output = bulkquiz(
        dir.path(),
        &["categories", "--categories", categories.to_str().expect("utf8")],
    )
    .output()
    .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("categories=2"));
    assert!(text.contains("category=math name=Math"));
    assert!(text.contains("category=history name=History"));
}

#[test]
fn batch_generates_and_saves_against_admin_api() {
    let dir = tempdir().expect("tempdir");
    let categories = write_categories(dir.path());
    let server = MockAdminServer::start(2);
    let output = bulkquiz(
        dir.path(),
        &[
            "batch",
            "--categories",
            categories.to_str().expect("utf8"),
            "--row",
            "math=5",
            "--row",
            "history=3",
            "--release-date",
            "2024-06-01",
            "--status",
            "active",
            "--save",
        ],
    )
    .env("BULKQUIZ_API_BASE", &server.base_url)
    .output()
    .expect("run");
    let requests = server.finish();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("generation=ok"));
    assert!(text.contains("quiz category=math title=Primes"));
    assert!(text.contains("save=ok"));
    assert!(text.contains("created_count=2"));
    assert!(text.contains("redirect=/admin/quizzes?batch=9"));

    assert_eq!(requests[0].0, "/admin/quizzes/bulk/generate");
    let generate: serde_json::Value = serde_json::from_str(&requests[0].1).expect("json");
    assert_eq!(
        generate,
        serde_json::json!({"rows":[
            {"category_id":"math","category_name":"Math","count":5},
            {"category_id":"history","category_name":"History","count":3}
        ]})
    );
    assert_eq!(requests[1].0, "/admin/quizzes/bulk/save");
    let save: serde_json::Value = serde_json::from_str(&requests[1].1).expect("json");
    assert_eq!(save["status"], "active");
    assert_eq!(save["release_date"], "2024-06-01");

    let log = fs::read_to_string(dir.path().join(".bulkquiz/logs/workflow.log")).expect("log");
    assert!(log.contains("\"event\":\"generate_succeeded\""));
    assert!(log.contains("\"event\":\"save_succeeded\""));
}

#[test]
fn batch_rejects_incomplete_or_unknown_rows_before_any_request() {
    let dir = tempdir().expect("tempdir");
    let categories = write_categories(dir.path());
    let output = bulkquiz(
        dir.path(),
        &[
            "batch",
            "--categories",
            categories.to_str().expect("utf8"),
            "--row",
            "math=20",
            "--row",
            "history=20",
            "--row",
            "=20",
        ],
    )
    .env("BULKQUIZ_API_BASE", "http://127.0.0.1:9")
    .output()
    .expect("run");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Select a category on every row"));

    let output = bulkquiz(
        dir.path(),
        &[
            "batch",
            "--categories",
            categories.to_str().expect("utf8"),
            "--row",
            "geography=2",
        ],
    )
    .output()
    .expect("run");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown category `geography`"));
}

#[test]
fn run_without_terminal_or_script_fails() {
    let dir = tempdir().expect("tempdir");
    let categories = write_categories(dir.path());
    let output = bulkquiz(
        dir.path(),
        &["run", "--categories", categories.to_str().expect("utf8")],
    )
    .output()
    .expect("run");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("BULKQUIZ_SCRIPT_KEYS"));
}

#[test]
fn scripted_run_generates_and_saves() {
    let dir = tempdir().expect("tempdir");
    let categories = write_categories(dir.path());
    let server = MockAdminServer::start(2);
    let output = bulkquiz(
        dir.path(),
        &[
            "run",
            "--categories",
            categories.to_str().expect("utf8"),
            "--release-date",
            "2024-06-01",
        ],
    )
    .env("BULKQUIZ_API_BASE", &server.base_url)
    .env("BULKQUIZ_SCRIPT_KEYS", "right,down,enter,s")
    .output()
    .expect("run");
    server.finish();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("workflow saved"));
    assert!(text.contains("redirect=/admin/quizzes?batch=9"));
    assert!(text.contains("review_count=0"));
}
