//! Test-only helpers: scratch directories and fake runtimes.
//!
//! Fake runtimes are `/bin/sh` scripts passed as the first runtime flag, so
//! tests never exec a file they just wrote.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::config::{CONFIG_FILE_NAME, LauncherConfig};

/// Name of the file a recording runtime writes its argv into.
pub const ARGV_FILE: &str = "argv.bin";

/// Scratch directory holding fake runtimes, artifacts and config.
pub struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    /// Create the sandbox under `parent` (e.g. to stay on the same filesystem
    /// as a binary that will be hard-linked in).
    pub fn new_in(parent: &Path) -> Result<Self> {
        let temp = tempfile::tempdir_in(parent)
            .with_context(|| format!("create tempdir in {}", parent.display()))?;
        Ok(Self { temp })
    }

    /// Canonical sandbox root.
    pub fn path(&self) -> PathBuf {
        fs::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
    }

    /// Write a placeholder artifact and return its path.
    pub fn write_artifact(&self, name: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, b"PK\x03\x04").with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write a shell script; run it through `/bin/sh`, not directly.
    pub fn write_script(&self, name: &str, body: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, format!("{body}\n")).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Script that records its argv (NUL-separated) and exits with `exit_code`.
    pub fn recording_script(&self, exit_code: i32) -> Result<PathBuf> {
        let argv_path = self.path().join(ARGV_FILE);
        self.write_script(
            "record.sh",
            &format!(
                "printf '%s\\0' \"$@\" > '{}'\nexit {exit_code}",
                argv_path.display()
            ),
        )
    }

    /// Arguments captured by the last recording script run.
    pub fn recorded_argv(&self) -> Result<Vec<OsString>> {
        let path = self.path().join(ARGV_FILE);
        let raw = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let mut parts: Vec<&[u8]> = raw.split(|byte| *byte == 0).collect();
        parts.pop();
        Ok(parts.into_iter().map(os_string_from_bytes).collect())
    }

    /// Config that runs `script` with `/bin/sh`, followed by `-jar` like a jar runtime.
    pub fn sh_config(&self, script: &Path, artifact: &str) -> LauncherConfig {
        LauncherConfig {
            runtime: "/bin/sh".to_string(),
            runtime_flags: vec![script.display().to_string(), "-jar".to_string()],
            artifact: PathBuf::from(artifact),
        }
    }

    /// Write `launcher.toml` into the sandbox.
    pub fn write_config(&self, config: &LauncherConfig) -> Result<PathBuf> {
        let path = self.path().join(CONFIG_FILE_NAME);
        let mut buf = toml::to_string_pretty(config).context("serialize config toml")?;
        buf.push('\n');
        fs::write(&path, buf).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Place the launcher binary in the sandbox, hard-linked when possible.
    pub fn install_launcher(&self, binary: &Path) -> Result<PathBuf> {
        let file_name = binary
            .file_name()
            .with_context(|| format!("binary missing file name {}", binary.display()))?;
        let dest = self.path().join(file_name);
        if fs::hard_link(binary, &dest).is_err() {
            fs::copy(binary, &dest)
                .with_context(|| format!("copy {} to {}", binary.display(), dest.display()))?;
        }
        Ok(dest)
    }
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStringExt;

    OsString::from_vec(bytes.to_vec())
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}
