use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where an artifact came from: code revision, call site, inputs and parameters.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub version: &'static str,
    pub callsite: Option<Callsite>,
    pub inputs: Vec<String>,
    pub params: Value,
    pub outputs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

impl Provenance {
    /// Record for the current build without a call site or outputs.
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            version: visgraph::VERSION,
            callsite: None,
            inputs: Vec::new(),
            params,
            outputs: Vec::new(),
        }
    }

    pub fn with_input<P: AsRef<Path>>(mut self, input: P) -> Self {
        self.inputs.push(input.as_ref().to_string_lossy().into_owned());
        self
    }
}

/// Write `<artifact>.provenance.json` next to `artifact`, naming it as the output.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, mut record: Provenance) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    record.callsite = Some(Callsite {
        file: callsite.file(),
        line: callsite.line(),
    });
    record.outputs = vec![artifact.to_string_lossy().into_owned()];
    fs::write(&sidecar, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

/// `dir/name.ext` becomes `dir/name.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let non_empty = |s: String| (!s.is_empty()).then_some(s);
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .and_then(non_empty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().and_then(non_empty))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_replaces_extension() {
        let derived = provenance_path(Path::new("/tmp/out/summary.json"));
        assert_eq!(derived, Path::new("/tmp/out/summary.provenance.json"));
        let bare = provenance_path(Path::new("maps/gen"));
        assert_eq!(bare, Path::new("maps/gen.provenance.json"));
    }

    #[test]
    fn sidecar_records_inputs_params_and_output() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("summary.json");
        fs::write(&artifact, "{}").unwrap();
        let record = Provenance::new(json!({"max_vertices": 10})).with_input("maps/a.txt");
        let path = write_sidecar(&artifact, record).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["inputs"][0], "maps/a.txt");
        assert_eq!(parsed["params"]["max_vertices"], 10);
        assert_eq!(parsed["version"], visgraph::VERSION);
        assert!(parsed["callsite"]["line"].as_u64().is_some());
        assert!(!parsed["code_rev"].as_str().unwrap().is_empty());
    }
}
