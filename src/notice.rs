//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `dataset_notices`.
//! Role: Shared contract helper for CLI diagnostics (non-error events).
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{Map, Value, json};

use crate::core::dataset::Dataset;
use crate::core::layer::ModuleSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub dataset: String,
    pub message: String,
    pub details: Map<String, Value>,
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("dataset".to_string(), json!(notice.dataset));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Notices for an opened dataset: unknown version, and modules ending in a partial record.
pub fn dataset_notices(
    dataset: &Dataset,
    modules: &[ModuleSummary],
    cmd: &str,
    time: &str,
) -> Vec<Notice> {
    let label = dataset.path().display().to_string();
    let mut notices = Vec::new();

    if dataset.version_ambiguous() {
        let mut details = Map::new();
        details.insert("version_code".to_string(), json!(dataset.version_code()));
        details.insert(
            "decoded_as".to_string(),
            json!(dataset.version().schema_version().as_str()),
        );
        notices.push(Notice {
            kind: "version_unknown".to_string(),
            time: time.to_string(),
            cmd: cmd.to_string(),
            dataset: label.clone(),
            message: format!(
                "unrecognized version code {:04}; decoding with newest layouts",
                dataset.version_code()
            ),
            details,
        });
    }

    for module in modules.iter().filter(|module| module.trailing_bytes > 0) {
        let mut details = Map::new();
        details.insert("module".to_string(), json!(module.module));
        details.insert("record_type".to_string(), json!(module.record_type));
        details.insert("trailing_bytes".to_string(), json!(module.trailing_bytes));
        details.insert("record_count".to_string(), json!(module.record_count));
        notices.push(Notice {
            kind: "truncated".to_string(),
            time: time.to_string(),
            cmd: cmd.to_string(),
            dataset: label.clone(),
            message: format!(
                "{} {} ends with a partial record ({} bytes ignored)",
                module.module, module.record_type, module.trailing_bytes
            ),
            details,
        });
    }
    notices
}
