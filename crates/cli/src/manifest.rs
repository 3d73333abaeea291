use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a run was asked to do and what it produced, beyond the output file itself.
pub struct Manifest {
    pub scenario: Value,
    pub summary: Value,
}

/// Write `<stem>.manifest.json` next to `artifact` with the git commit, library version,
/// scenario, run summary and output path.
pub fn write_manifest<P: AsRef<Path>>(artifact: P, manifest: Manifest) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = manifest_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating manifest dir {}", parent.display()))?;
        }
    }
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": buoyancy::VERSION,
        "scenario": manifest.scenario,
        "summary": manifest.summary,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn manifest_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("trajectory"));
    name.push(".manifest.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn manifest_sits_next_to_the_trajectory() {
        let derived = manifest_path(Path::new("/tmp/runs/pool.parquet"));
        assert_eq!(derived, Path::new("/tmp/runs/pool.manifest.json"));
    }

    #[test]
    fn write_manifest_records_scenario_and_output() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("traj.csv");
        let manifest = Manifest {
            scenario: json!({"dt": 0.5}),
            summary: json!({"steps": 3}),
        };
        let path = write_manifest(&artifact, manifest).unwrap();
        assert!(path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["scenario"]["dt"], 0.5);
        assert_eq!(parsed["summary"]["steps"], 3);
        assert_eq!(parsed["version"], buoyancy::VERSION);
    }
}
