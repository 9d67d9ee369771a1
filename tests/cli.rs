use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payrail(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("payrail").unwrap();
    cmd.arg("--config-dir")
        .arg(config_dir.path())
        .env_remove("PAYRAIL_URL")
        .env_remove("PAYRAIL_PROFILE")
        .env_remove("PAYRAIL_TOKEN")
        .env_remove("PAYRAIL_CLIENT_ID")
        .env_remove("PAYRAIL_CLIENT_SECRET");
    cmd
}

#[test]
fn test_help_lists_resources() {
    let dir = TempDir::new().unwrap();
    payrail(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("payments"))
        .stdout(predicate::str::contains("transfers"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_set_then_show() {
    let dir = TempDir::new().unwrap();

    payrail(&dir)
        .args(["config", "set", "url", "https://api.payrail.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set url for profile 'default'"));
    payrail(&dir)
        .args(["config", "set", "tenant", "acme"])
        .assert()
        .success();

    payrail(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base_url\": \"https://api.payrail.example\""))
        .stdout(predicate::str::contains("\"tenant_id\": \"acme\""))
        .stdout(predicate::str::contains("\"authenticated\": false"));

    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let dir = TempDir::new().unwrap();

    payrail(&dir)
        .args(["config", "set", "url", "ftp://files.example"])
        .assert()
        .failure()
        .code(1);
    payrail(&dir)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout must be a number"));
    payrail(&dir)
        .args(["config", "set", "timeout", "1e30"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is too large"));
    payrail(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field: colour"));
}

#[test]
fn test_missing_base_url_prints_hint() {
    let dir = TempDir::new().unwrap();
    payrail(&dir)
        .args(["payments", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No base URL configured"))
        .stderr(predicate::str::contains("Hint:"));
}

#[test]
fn test_unknown_profile_fails() {
    let dir = TempDir::new().unwrap();
    payrail(&dir)
        .args(["--profile", "staging", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'staging' not found"));
}

// Port 9 (discard) is never contacted: validation fails first.
#[test]
fn test_invalid_filter_key_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    payrail(&dir)
        .env("PAYRAIL_URL", "http://127.0.0.1:9")
        .args(["payments", "list", "--filter", "colour=blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter key 'colour'"));
}

#[test]
fn test_invalid_filter_value_and_limit_fail() {
    let dir = TempDir::new().unwrap();
    payrail(&dir)
        .env("PAYRAIL_URL", "http://127.0.0.1:9")
        .args(["payments", "list", "--filter", "status=lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    payrail(&dir)
        .env("PAYRAIL_URL", "http://127.0.0.1:9")
        .args(["transfers", "list", "--limit", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit must be zero or positive"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_and_get_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(query_param("status", "active"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageItems": [{"id": "a_1"}, {"id": "a_2"}],
            "totalFilteredRecords": 7
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/a_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (list, get) = tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let list = payrail(&dir)
            .env("PAYRAIL_URL", &uri)
            .args(["accounts", "list", "--filter", "status=active", "--limit", "2"])
            .output()
            .unwrap();
        let get = payrail(&dir)
            .env("PAYRAIL_URL", &uri)
            .args(["accounts", "get", "a_1"])
            .output()
            .unwrap();
        (list, get)
    })
    .await
    .unwrap();

    assert!(list.status.success());
    let page: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    assert_eq!(page["totalFilteredRecords"], json!(7));
    assert_eq!(page["pageItems"].as_array().unwrap().len(), 2);

    assert!(get.status.success());
    let record: serde_json::Value = serde_json::from_slice(&get.stdout).unwrap();
    assert_eq!(record["id"], json!("a_1"));
}
