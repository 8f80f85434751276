// CLI integration tests for info, schema, and dump.
mod common;

use std::process::Command;

use common::{VERSION_2002, alt_name_dataset, rt1_line};
use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_tigerline");
    let mut command = Command::new(exe);
    command
        .env_remove("TIGER_VERSION")
        .env_remove("TIGER_LFIELD_AS_STRING")
        .env("RUST_LOG", "error");
    command
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

fn parse_json_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(output)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_json)
        .collect()
}

#[test]
fn info_reports_layers_and_counts() {
    let temp = tempfile::tempdir().expect("tempdir");
    alt_name_dataset(temp.path());

    let info = cmd()
        .args(["info", temp.path().to_str().unwrap()])
        .output()
        .expect("info");
    assert!(info.status.success());
    let info_json = parse_json(std::str::from_utf8(&info.stdout).expect("utf8"));
    assert_eq!(info_json["version"], "TIGER_2002");
    assert_eq!(info_json["version_code"], 1002);
    assert_eq!(info_json["modules"][0], "TGR01001.RT");

    let layers = info_json["layers"].as_array().expect("layers");
    let alt = layers
        .iter()
        .find(|layer| layer["name"] == "AltName")
        .expect("AltName layer");
    assert_eq!(alt["feature_count"], 8);
    assert_eq!(alt["modules"][1]["record_count"], 5);
    let chains = layers
        .iter()
        .find(|layer| layer["name"] == "CompleteChain")
        .expect("CompleteChain layer");
    assert_eq!(chains["feature_count"], 2);
    assert!(info.stderr.is_empty());
}

#[test]
fn schema_lists_fields_and_capabilities() {
    let temp = tempfile::tempdir().expect("tempdir");
    alt_name_dataset(temp.path());

    let schema = cmd()
        .args(["schema", temp.path().to_str().unwrap(), "altname"])
        .output()
        .expect("schema");
    assert!(schema.status.success());
    let schema_json = parse_json(std::str::from_utf8(&schema.stdout).expect("utf8"));
    assert_eq!(schema_json["name"], "AltName");
    assert_eq!(schema_json["record_type"], "RT4");
    let names: Vec<&str> = schema_json["fields"]
        .as_array()
        .expect("fields")
        .iter()
        .filter_map(|field| field["name"].as_str())
        .collect();
    assert_eq!(names, vec!["MODULE", "TLID", "RTSQ", "FEAT"]);
    assert_eq!(schema_json["fields"][3]["type"], "IntegerList");
    assert_eq!(schema_json["capabilities"]["RandomRead"], true);
    assert_eq!(schema_json["capabilities"]["RandomWrite"], false);
}

#[test]
fn dump_streams_features_as_json_lines() {
    let temp = tempfile::tempdir().expect("tempdir");
    alt_name_dataset(temp.path());
    let path = temp.path().to_str().unwrap();

    let dump = cmd()
        .args(["dump", path, "AltName", "--limit", "4"])
        .output()
        .expect("dump");
    assert!(dump.status.success());
    let features = parse_json_lines(&dump.stdout);
    assert_eq!(features.len(), 4);
    assert_eq!(features[3]["fid"], 3);
    assert_eq!(features[3]["fields"]["MODULE"], "TGR01003");
    assert_eq!(features[3]["fields"]["FEAT"], serde_json::json!([201, 300]));
    assert!(features[0]["geometry"].is_null());

    let single = cmd()
        .args(["dump", path, "CompleteChain", "--fid", "1"])
        .output()
        .expect("dump fid");
    assert!(single.status.success());
    let features = parse_json_lines(&single.stdout);
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["fields"]["TLID"], 50);
    assert_eq!(features[0]["geometry"]["type"], "LineString");
    assert_eq!(features[0]["geometry"]["coordinates"][0], serde_json::json!([-87.0, 31.0]));
}

#[test]
fn missing_dataset_reports_not_found_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("nope");

    let info = cmd()
        .args(["info", missing.to_str().unwrap()])
        .output()
        .expect("info");
    assert_eq!(info.status.code(), Some(3));
    assert!(info.stdout.is_empty());
    let err_json = parse_json(std::str::from_utf8(&info.stderr).expect("utf8").trim());
    assert_eq!(err_json["error"]["kind"], "NotFound");
    assert!(err_json["error"]["hint"].is_string());
}

#[test]
fn unknown_layer_and_bad_fid_fail() {
    let temp = tempfile::tempdir().expect("tempdir");
    alt_name_dataset(temp.path());
    let path = temp.path().to_str().unwrap();

    let schema = cmd()
        .args(["schema", path, "Roads"])
        .output()
        .expect("schema");
    assert_eq!(schema.status.code(), Some(3));
    let err_json = parse_json(std::str::from_utf8(&schema.stderr).expect("utf8").trim());
    assert!(err_json["error"]["hint"].as_str().unwrap().contains("CompleteChain"));

    let dump = cmd()
        .args(["dump", path, "AltName", "--fid", "99"])
        .output()
        .expect("dump");
    assert!(!dump.status.success());
    let err_json = parse_json(std::str::from_utf8(&dump.stderr).expect("utf8").trim());
    assert_eq!(err_json["error"]["kind"], "OutOfRange");
}

#[test]
fn bad_version_flag_is_a_usage_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    alt_name_dataset(temp.path());

    let info = cmd()
        .args(["--tiger-version", "TIGER_1066", "info", temp.path().to_str().unwrap()])
        .output()
        .expect("info");
    assert_eq!(info.status.code(), Some(2));
    let err_json = parse_json(std::str::from_utf8(&info.stderr).expect("utf8").trim());
    assert_eq!(err_json["error"]["kind"], "Usage");
}

#[test]
fn truncated_module_emits_notice() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut body = rt1_line(
        VERSION_2002,
        9,
        "Pine",
        (-1_000_000, 1_000_000),
        (-2_000_000, 2_000_000),
    );
    body.push_str("\r\n");
    body.push_str("1100");
    std::fs::write(temp.path().join("TGR02001.RT1"), body).expect("write");

    let dump = cmd()
        .args(["dump", temp.path().to_str().unwrap(), "CompleteChain"])
        .output()
        .expect("dump");
    assert!(dump.status.success());
    assert_eq!(parse_json_lines(&dump.stdout).len(), 1);
    let notices = parse_json_lines(&dump.stderr);
    let truncated = notices
        .iter()
        .find(|value| value["notice"]["kind"] == "truncated")
        .expect("truncated notice");
    assert_eq!(truncated["notice"]["cmd"], "dump");
    assert_eq!(truncated["notice"]["details"]["trailing_bytes"], 4);
}
