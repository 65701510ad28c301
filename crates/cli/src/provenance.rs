use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const SIDECAR_NAME: &str = "provenance.json";

/// Parameters and outputs of one CLI run.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            outputs: Vec::new(),
        }
    }

    pub fn push_output<P: AsRef<Path>>(&mut self, path: P) {
        self.outputs.push(path.as_ref().to_string_lossy().into_owned());
    }
}

/// Provenance document: code revision, library version, callsite, params, outputs.
#[track_caller]
pub fn document(payload: &Payload) -> Value {
    let callsite = Location::caller();
    json!({
        "code_rev": current_git_rev(),
        "botfield_version": botfield::VERSION,
        "command": payload.command,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": payload.outputs
    })
}

/// Write `<dir>/provenance.json` describing the run that filled `dir`.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(dir: P, payload: &Payload) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?;
    }
    let path = dir.join(SIDECAR_NAME);
    let doc = document(payload);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
