//! Purpose: Hold top-level CLI command dispatch for `tigerline`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Stdout receives exactly one JSON document (info/schema) or JSON Lines (dump).
//! Invariants: Notices are emitted after the command's stdout payload.

use std::collections::BTreeSet;
use std::path::Path;

use clap::CommandFactory;
use tigerline::core::dataset::Dataset;
use tigerline::core::layer::{Capability, FieldDefn, ModuleSummary, TigerLayer};
use tigerline::notice::dataset_notices;

use super::*;

#[derive(Serialize)]
struct InfoReport<'a> {
    path: String,
    version: &'static str,
    version_code: u32,
    version_ambiguous: bool,
    modules: Vec<&'a str>,
    layers: Vec<LayerReport>,
}

#[derive(Serialize)]
struct LayerReport {
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    feature_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<ModuleSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

#[derive(Serialize)]
struct SchemaReport<'a> {
    name: &'static str,
    record_type: String,
    version: &'static str,
    feature_count: u64,
    fields: &'a [FieldDefn],
    capabilities: Map<String, Value>,
}

pub(super) fn dispatch_command(
    command: Command,
    options: OpenOptions,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "tigerline", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Info { path } => {
            let mut dataset = Dataset::open(&path, options)?;
            let mut layers = Vec::new();
            let mut summaries = Vec::new();
            for kind in dataset.available_layers() {
                match dataset.layer(kind) {
                    Ok(layer) => {
                        let modules = layer.modules();
                        summaries.extend(modules.iter().cloned());
                        layers.push(LayerReport {
                            name: kind.name(),
                            feature_count: Some(layer.feature_count()),
                            modules: Some(modules),
                            error: None,
                        });
                    }
                    Err(err) => {
                        tracing::debug!(
                            layer = kind.name(),
                            error = %error_message(&err),
                            "layer failed to open"
                        );
                        layers.push(LayerReport {
                            name: kind.name(),
                            feature_count: None,
                            modules: None,
                            error: error_json(&err).get("error").cloned(),
                        });
                    }
                }
            }

            let report = InfoReport {
                path: path.display().to_string(),
                version: dataset.version().as_str(),
                version_code: dataset.version_code(),
                version_ambiguous: dataset.version_ambiguous(),
                modules: dataset.modules().iter().collect(),
                layers,
            };
            emit_json(&report);
            emit_dataset_notices(&dataset, summaries, "info", color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Schema { path, layer } => {
            let mut dataset = Dataset::open(&path, options)?;
            let layer = dataset.layer_by_name(&layer)?;
            let capabilities = Capability::ALL
                .iter()
                .map(|capability| {
                    (
                        capability.name().to_string(),
                        Value::Bool(layer.test_capability(*capability)),
                    )
                })
                .collect();
            let report = SchemaReport {
                name: layer.name(),
                record_type: layer.kind().primary().to_string(),
                version: layer.version().as_str(),
                feature_count: layer.feature_count(),
                fields: layer.fields(),
                capabilities,
            };
            emit_json(&report);
            Ok(RunOutcome::ok())
        }
        Command::Dump {
            path,
            layer,
            fid,
            limit,
        } => {
            let mut dataset = Dataset::open(&path, options)?;
            let target = dataset.layer_by_name(&layer)?;
            let summaries = target.modules();
            dump_layer(target, fid, limit, &path)?;
            emit_dataset_notices(&dataset, summaries, "dump", color_mode);
            Ok(RunOutcome::ok())
        }
    }
}

fn dump_layer(
    layer: &mut TigerLayer,
    fid: Option<u64>,
    limit: Option<u64>,
    path: &Path,
) -> Result<(), Error> {
    if let Some(fid) = fid {
        let feature = layer.feature(fid).map_err(|err| {
            if err.path().is_none() {
                err.with_path(path)
            } else {
                err
            }
        })?;
        emit_json_line(&feature);
        return Ok(());
    }

    layer.reset_reading();
    let mut emitted = 0u64;
    while limit.is_none_or(|limit| emitted < limit) {
        let Some(feature) = layer.next_feature()? else {
            break;
        };
        emit_json_line(&feature);
        emitted += 1;
    }
    tracing::debug!(layer = layer.name(), emitted, "dump finished");
    Ok(())
}

fn emit_dataset_notices(
    dataset: &Dataset,
    summaries: Vec<ModuleSummary>,
    cmd: &str,
    color_mode: ColorMode,
) {
    let mut seen = BTreeSet::new();
    let summaries: Vec<ModuleSummary> = summaries
        .into_iter()
        .filter(|summary| seen.insert((summary.module.clone(), summary.record_type.clone())))
        .collect();
    let time = notice_time_now();
    for notice in dataset_notices(dataset, &summaries, cmd, &time) {
        emit_notice(&notice, color_mode);
    }
}
