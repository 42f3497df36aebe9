//! Command-forwarding launcher.
//!
//! Locates a bundled artifact, hands it to an external runtime together with
//! the caller's arguments, and relays the runtime's exit status:
//!
//! ```text
//! launcher a b c   =>   <runtime> <runtime_flags..> <artifact> a b c
//! ```
//!
//! - **[`config`]**: `launcher.toml` next to the binary (runtime, flags, artifact).
//! - **[`invocation`]**: the argument-vector invariant. Pure, no I/O.
//! - **[`launch`]**: runtime lookup, artifact check, spawn, status mapping.
//! - **[`process`]** / **[`signals`]**: the child with inherited stdio and the
//!   interrupt policy while it runs.
//!
//! Nothing in the library exits the process; [`launch::launch`] returns the
//! code and only the binary calls `std::process::exit`.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod invocation;
pub mod launch;
pub mod logging;
pub mod process;
pub mod signals;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
