//! Stable exit codes for launch failures.
//!
//! On a normal child exit the launcher exits with the child's own code, so
//! these values only mean "launch failed" together with the stderr diagnostic.

/// The runtime started but its exit status could not be collected.
pub const WAIT_FAILED: i32 = 122;
/// The launcher could not determine where its own executable lives.
pub const LAUNCHER_NOT_LOCATED: i32 = 123;
/// `launcher.toml` is unreadable or invalid.
pub const INVALID_CONFIG: i32 = 124;
/// The bundled artifact is missing or is not a regular file.
pub const ARTIFACT_NOT_FOUND: i32 = 125;
/// The runtime was found but the OS refused to start it.
pub const SPAWN_FAILED: i32 = 126;
/// The runtime is not resolvable on the executable search path.
pub const RUNTIME_NOT_FOUND: i32 = 127;
/// Child killed by signal `N` exits the launcher with `SIGNAL_BASE + N`.
pub const SIGNAL_BASE: i32 = 128;
