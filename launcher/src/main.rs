//! `launcher [ARGS...]`: run the bundled artifact with every argument forwarded.
//!
//! The launcher owns no flags, so `argv` is taken straight from the OS and not
//! parsed at all.

use std::env;

use launcher::config::{CONFIG_FILE_NAME, launcher_dir, load_config};
use launcher::error::LaunchError;
use launcher::invocation::Invocation;
use launcher::launch::launch;
use launcher::logging;

const PROGRAM: &str = env!("CARGO_PKG_NAME");

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{PROGRAM}: {err}");
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32, LaunchError> {
    let base_dir = launcher_dir().map_err(LaunchError::Locate)?;
    let config = load_config(&base_dir.join(CONFIG_FILE_NAME)).map_err(LaunchError::Config)?;
    let invocation = Invocation::from_config(&config, &base_dir, env::args_os().skip(1));
    launch(&invocation)
}
