//! The single transient launch request.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;

/// Everything needed to start the runtime once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Bare executable name (searched on `PATH`) or a path to it.
    pub runtime: PathBuf,
    /// Flags placed before the artifact.
    pub runtime_flags: Vec<OsString>,
    /// Bundled artifact handed to the runtime.
    pub artifact: PathBuf,
    /// Caller arguments, forwarded untouched.
    pub user_args: Vec<OsString>,
}

impl Invocation {
    /// Build an invocation from config; relative paths resolve against `base_dir`.
    pub fn from_config<I>(config: &LauncherConfig, base_dir: &Path, user_args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self {
            runtime: runtime_path(&config.runtime, base_dir),
            runtime_flags: config.runtime_flags.iter().map(OsString::from).collect(),
            artifact: base_dir.join(&config.artifact),
            user_args: user_args.into_iter().collect(),
        }
    }

    /// Child argument vector: `runtime_flags ++ [artifact] ++ user_args`.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.runtime_flags.len() + 1 + self.user_args.len());
        argv.extend(self.runtime_flags.iter().cloned());
        argv.push(self.artifact.clone().into_os_string());
        argv.extend(self.user_args.iter().cloned());
        argv
    }
}

/// Bare names stay bare for the `PATH` search; anything with a directory
/// part is anchored to `base_dir` unless already absolute.
fn runtime_path(runtime: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(runtime);
    if path.is_absolute() || path.components().count() == 1 {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
