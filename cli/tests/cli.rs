//! End-to-end tests for the `embedcmp` binary against a mock embedding API.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("store").join("reference.json")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// A command isolated from the caller's environment and config.
    fn cmd(&self, server: Option<&MockServer>) -> Command {
        let mut cmd = Command::cargo_bin("embedcmp").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("OPENAI_API_KEY")
            .env_remove("OPENAI_BASE_URL")
            .env_remove("EMBEDCMP_MODEL")
            .env_remove("EMBEDCMP_DIMENSIONS")
            .env_remove("EMBEDCMP_STORE")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .arg("--store")
            .arg(self.store());
        if let Some(server) = server {
            cmd.env("OPENAI_API_KEY", "test-key")
                .arg("--base-url")
                .arg(server.uri());
        }
        cmd
    }
}

async fn mock_embedding(server: &MockServer, input: &str, vector: &[f32]) {
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(serde_json::json!({ "input": input })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [{ "object": "embedding", "index": 0, "embedding": vector }],
            "model": "text-embedding-3-small",
            "usage": { "prompt_tokens": 2, "total_tokens": 2 }
        })))
        .mount(server)
        .await;
}

fn stored_label(store: &Path) -> String {
    let content = std::fs::read_to_string(store).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value["embedding"]["label"].as_str().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn embed_and_save_reference() {
    let server = MockServer::start().await;
    mock_embedding(&server, "alpha text", &[1.0, 0.0]).await;
    let env = Env::new();
    let file = env.write("alpha.txt", "alpha text");

    env.cmd(Some(&server))
        .arg("embed")
        .arg(&file)
        .arg("--save")
        .assert()
        .success()
        .stdout(predicate::str::contains("label: alpha.txt"))
        .stdout(predicate::str::contains("dimension: 2"))
        .stdout(predicate::str::contains("vector: [1.000000, 0.000000]"))
        .stdout(predicate::str::contains("saved reference: alpha.txt"));

    assert_eq!(stored_label(&env.store()), "alpha.txt");

    env.cmd(None)
        .args(["reference", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("label: alpha.txt"));
}

#[tokio::test(flavor = "multi_thread")]
async fn compare_against_reference() {
    let server = MockServer::start().await;
    mock_embedding(&server, "alpha", &[1.0, 0.0]).await;
    mock_embedding(&server, "beta", &[0.0, 1.0]).await;
    mock_embedding(&server, "gamma", &[1.0, 0.0]).await;
    let env = Env::new();
    let alpha = env.write("alpha.txt", "alpha");
    let beta = env.write("beta.txt", "beta");
    let gamma = env.write("gamma.txt", "gamma");

    env.cmd(Some(&server))
        .arg("embed")
        .arg(&alpha)
        .arg("--save")
        .assert()
        .success();

    env.cmd(Some(&server))
        .arg("compare")
        .arg(&beta)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "similarity: 0.0000 (beta.txt vs reference alpha.txt)",
        ));

    env.cmd(Some(&server))
        .arg("compare")
        .arg(&gamma)
        .assert()
        .success()
        .stdout(predicate::str::contains("similarity: 1.0000"));
}

#[tokio::test(flavor = "multi_thread")]
async fn second_save_replaces_reference() {
    let server = MockServer::start().await;
    mock_embedding(&server, "one", &[1.0, 0.0]).await;
    mock_embedding(&server, "two", &[0.0, 1.0]).await;
    let env = Env::new();
    let one = env.write("one.txt", "one");
    let two = env.write("two.txt", "two");

    for file in [&one, &two] {
        env.cmd(Some(&server))
            .arg("embed")
            .arg(file)
            .arg("--save")
            .assert()
            .success();
    }

    assert_eq!(stored_label(&env.store()), "two.txt");
}

#[tokio::test(flavor = "multi_thread")]
async fn compare_without_reference_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let env = Env::new();
    let file = env.write("a.txt", "a");

    env.cmd(Some(&server))
        .arg("compare")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no stored reference embedding"));
}

#[test]
fn missing_api_key_is_initialization_failure() {
    let env = Env::new();
    let file = env.write("a.txt", "a");

    env.cmd(None)
        .arg("embed")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not configured"));
}

#[tokio::test(flavor = "multi_thread")]
async fn service_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;
    let env = Env::new();
    let file = env.write("a.txt", "a");

    env.cmd(Some(&server))
        .arg("embed")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("upstream exploded"));
}

#[test]
fn corrupted_reference_is_discarded() {
    let env = Env::new();
    std::fs::create_dir_all(env.store().parent().unwrap()).unwrap();
    std::fs::write(env.store(), "{ definitely not json").unwrap();

    env.cmd(None)
        .args(["reference", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no reference stored"));

    assert!(!env.store().exists());
}

#[test]
fn non_utf8_reference_is_discarded() {
    let env = Env::new();
    std::fs::create_dir_all(env.store().parent().unwrap()).unwrap();
    std::fs::write(env.store(), [0xff, 0xfe, b'{', 0xc3]).unwrap();

    env.cmd(None)
        .args(["reference", "clear"])
        .assert()
        .success();
    assert!(!env.store().exists());

    env.cmd(None)
        .args(["reference", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no reference stored"));
}

#[tokio::test(flavor = "multi_thread")]
async fn export_writes_named_file() {
    let server = MockServer::start().await;
    mock_embedding(&server, "notes", &[0.5, 0.25]).await;
    let env = Env::new();
    let file = env.write("notes.txt", "notes");
    let out = env.dir.path().join("exports");

    env.cmd(Some(&server))
        .arg("embed")
        .arg(&file)
        .arg("--export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("embedding-notes.txt.json"));

    let content = std::fs::read_to_string(out.join("embedding-notes.txt.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["label"], "notes.txt");
    assert_eq!(value["vector"], serde_json::json!([0.5, 0.25]));
}

#[test]
fn reference_clear_without_reference() {
    let env = Env::new();

    env.cmd(None)
        .args(["reference", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reference cleared"));

    env.cmd(None)
        .args(["reference", "export"])
        .arg(env.dir.path())
        .assert()
        .code(1);
}

#[test]
fn missing_api_key_is_quiet_for_reference_commands() {
    let env = Env::new();

    env.cmd(None)
        .args(["reference", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not configured").not());

    env.cmd(None)
        .args(["-vv", "reference", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not configured"));
}
