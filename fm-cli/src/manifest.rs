//! JSON run manifests: one file per invocation recording the resolved
//! parameters and outcome, written only when `--manifest-dir` is given.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct ManifestEntry {
    pub run_id: String,
    pub version: String,
    pub timestamp: String,
    pub aux: String,
    pub mode: String,
    pub cap: u64,
    pub out: String,
    pub outcome: Outcome,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Partitioned {
        cut_size: usize,
        passes_run: usize,
    },
    Infeasible {
        message: String,
    },
}

pub fn record_manifest(
    dir: &Path,
    aux: &str,
    mode: &str,
    cap: u64,
    out: &str,
    outcome: Outcome,
) -> Result<()> {
    let run_id = Uuid::new_v4().to_string();
    fs::create_dir_all(dir)?;
    let entry = ManifestEntry {
        run_id: run_id.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        aux: aux.to_string(),
        mode: mode.to_string(),
        cap,
        out: out.to_string(),
        outcome,
    };
    let json = serde_json::to_string_pretty(&entry)?;
    let path = dir.join(format!("run-{run_id}.json"));
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "recorded run manifest");
    Ok(())
}
