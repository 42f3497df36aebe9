//! Launcher configuration stored in `launcher.toml` next to the executable.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up in the launcher directory.
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Launcher configuration (TOML).
///
/// Fixed at install time alongside the bundled artifact. Missing fields fall
/// back to running `yuicompressor.jar` with `java -jar`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Runtime executable. A bare name is looked up on `PATH`; a relative
    /// path is taken relative to the launcher directory.
    pub runtime: String,

    /// Flags placed before the artifact (e.g. `["-jar"]`).
    pub runtime_flags: Vec<String>,

    /// Bundled artifact, relative to the launcher directory unless absolute.
    pub artifact: PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            runtime: "java".to_string(),
            runtime_flags: vec!["-jar".to_string()],
            artifact: PathBuf::from("yuicompressor.jar"),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(anyhow!("runtime must be a non-empty string"));
        }
        if self.artifact.as_os_str().is_empty() {
            return Err(anyhow!("artifact must be a non-empty path"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LauncherConfig::default()`.
pub fn load_config(path: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        let cfg = LauncherConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LauncherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Directory holding the launcher binary, with symlinks resolved so an
/// installed link still finds the bundled artifact.
pub fn launcher_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("locate launcher executable")?;
    let exe = fs::canonicalize(&exe).with_context(|| format!("resolve {}", exe.display()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("launcher path missing parent {}", exe.display()))
}
