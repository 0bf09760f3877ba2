use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use clubseed_core::RedactedConnection;
use clubseed_generate::GenerateOptions;

use super::RunArtifactError;

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub command: &'static str,
    pub run_dir: PathBuf,
    pub engine: Option<String>,
    pub connection: Option<RedactedConnection>,
    pub options: Option<GenerateOptions>,
    pub seed: Option<u64>,
    pub dry_run: bool,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub command: &'a str,
    pub engine: Option<&'a str>,
    pub connection: Option<&'a RedactedConnection>,
    pub options: Option<&'a GenerateOptions>,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub summary_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> Result<RunPaths, RunArtifactError> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .run_dir
        .join(format!("{timestamp}__{}_{}", ctx.command, ctx.run_id));

    create_dir_all(&root).map_err(|source| RunArtifactError::CreateDir {
        path: root.clone(),
        source,
    })?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");
    let summary_path = root.join("summary.json");

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        command: ctx.command,
        engine: ctx.engine.as_deref(),
        connection: ctx.connection.as_ref(),
        options: ctx.options.as_ref(),
        seed: ctx.seed,
        dry_run: ctx.dry_run,
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    Ok(RunPaths {
        root,
        logs_path,
        summary_path,
    })
}

pub fn write_summary<T: Serialize>(paths: &RunPaths, summary: &T) -> Result<(), RunArtifactError> {
    write_json(&paths.summary_path, summary)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RunArtifactError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| RunArtifactError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(|source| RunArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })
}
