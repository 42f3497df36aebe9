//! CLI tests for the launcher binary.
//!
//! Each test installs the built binary into a scratch directory next to its
//! own `launcher.toml`, artifact and fake runtime, then runs it like a user
//! would and checks what the runtime saw and what the launcher exited with.
#![cfg(unix)]

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use launcher::config::LauncherConfig;
use launcher::exit_codes;
use launcher::test_support::Sandbox;

fn sandbox() -> Sandbox {
    Sandbox::new_in(Path::new(env!("CARGO_TARGET_TMPDIR"))).expect("sandbox")
}

fn install(sandbox: &Sandbox) -> PathBuf {
    sandbox
        .install_launcher(Path::new(env!("CARGO_BIN_EXE_launcher")))
        .expect("install launcher")
}

fn run(launcher: &Path, args: &[&str]) -> Output {
    Command::new(launcher)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run launcher")
}

#[test]
fn forwards_arguments_verbatim() {
    let sandbox = sandbox();
    let script = sandbox.recording_script(0).expect("script");
    let artifact = sandbox.write_artifact("app.jar").expect("artifact");
    sandbox
        .write_config(&sandbox.sh_config(&script, "app.jar"))
        .expect("config");
    let launcher = install(&sandbox);

    let args = ["--", "--help", "-jar", "x y", "", "--help"];
    let output = run(&launcher, &args);
    assert_eq!(output.status.code(), Some(0));

    let mut expected = vec![OsString::from("-jar"), artifact.into_os_string()];
    expected.extend(args.iter().map(OsString::from));
    assert_eq!(sandbox.recorded_argv().expect("argv"), expected);
}

#[test]
fn version_scenario_prints_child_output() {
    let sandbox = sandbox();
    let script = sandbox
        .write_script(
            "version.sh",
            "if [ \"$3\" = \"--version\" ]; then echo 1.2.3; exit 0; fi\nexit 9",
        )
        .expect("script");
    sandbox.write_artifact("app.jar").expect("artifact");
    sandbox
        .write_config(&sandbox.sh_config(&script, "app.jar"))
        .expect("config");
    let launcher = install(&sandbox);

    let output = run(&launcher, &["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1.2.3\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn relays_child_exit_codes() {
    for expected in [0, 1, 3, 125, 255] {
        let sandbox = sandbox();
        let script = sandbox.recording_script(expected).expect("script");
        sandbox.write_artifact("app.jar").expect("artifact");
        sandbox
            .write_config(&sandbox.sh_config(&script, "app.jar"))
            .expect("config");
        let launcher = install(&sandbox);

        let output = run(&launcher, &[]);
        assert_eq!(output.status.code(), Some(expected));
        assert!(output.stderr.is_empty(), "launcher added no diagnostics");
    }
}

#[test]
fn stdin_and_stderr_pass_through() {
    let sandbox = sandbox();
    let script = sandbox
        .write_script("cat.sh", "cat\necho warned >&2\nexit 4")
        .expect("script");
    sandbox.write_artifact("app.jar").expect("artifact");
    sandbox
        .write_config(&sandbox.sh_config(&script, "app.jar"))
        .expect("config");
    let launcher = install(&sandbox);

    let input: &[u8] = b"var a = 1;\n\x00\xffraw bytes";
    let mut child = Command::new(&launcher)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn launcher");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input)
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(output.stdout, input);
    assert_eq!(String::from_utf8_lossy(&output.stderr), "warned\n");
}

#[test]
fn missing_runtime_exits_with_runtime_code() {
    let sandbox = sandbox();
    sandbox
        .write_config(&LauncherConfig {
            runtime: "launcher-test-no-such-runtime".to_string(),
            runtime_flags: vec!["-jar".to_string()],
            artifact: PathBuf::from("missing.jar"),
        })
        .expect("config");
    let launcher = install(&sandbox);

    let output = run(&launcher, &["in.js"]);
    assert_eq!(output.status.code(), Some(exit_codes::RUNTIME_NOT_FOUND));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("launcher-test-no-such-runtime"), "{stderr}");
    assert!(!stderr.contains("artifact"), "{stderr}");
}

#[test]
fn missing_artifact_exits_with_artifact_code() {
    let sandbox = sandbox();
    let script = sandbox.recording_script(0).expect("script");
    sandbox
        .write_config(&sandbox.sh_config(&script, "missing.jar"))
        .expect("config");
    let launcher = install(&sandbox);

    let output = run(&launcher, &[]);
    assert_eq!(output.status.code(), Some(exit_codes::ARTIFACT_NOT_FOUND));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("artifact not found"), "{stderr}");
    assert!(stderr.contains("missing.jar"), "{stderr}");
}

#[test]
fn invalid_config_exits_with_config_code() {
    let sandbox = sandbox();
    fs::write(sandbox.path().join("launcher.toml"), "runtime = [\n").expect("write config");
    let launcher = install(&sandbox);

    let output = run(&launcher, &[]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID_CONFIG));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid launcher config"), "{stderr}");
}

#[test]
fn signal_death_exits_with_signal_code() {
    let sandbox = sandbox();
    let script = sandbox
        .write_script("die.sh", "kill -TERM $$")
        .expect("script");
    sandbox.write_artifact("app.jar").expect("artifact");
    sandbox
        .write_config(&sandbox.sh_config(&script, "app.jar"))
        .expect("config");
    let launcher = install(&sandbox);

    let output = run(&launcher, &[]);
    assert_eq!(output.status.code(), Some(exit_codes::SIGNAL_BASE + 15));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("signal 15"), "{stderr}");
}

#[test]
fn interrupt_during_child_relays_child_code() {
    for signal in ["-INT", "-QUIT"] {
        let sandbox = sandbox();
        let started = sandbox.path().join("started");
        let script = sandbox
            .write_script(
                "slow.sh",
                &format!("touch '{}'\nsleep 1\nexit 3", started.display()),
            )
            .expect("script");
        sandbox.write_artifact("app.jar").expect("artifact");
        sandbox
            .write_config(&sandbox.sh_config(&script, "app.jar"))
            .expect("config");
        let launcher = install(&sandbox);

        let mut child = Command::new(&launcher)
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .spawn()
            .expect("spawn launcher");

        let deadline = Instant::now() + Duration::from_secs(10);
        while !started.exists() {
            assert!(Instant::now() < deadline, "runtime never started");
            thread::sleep(Duration::from_millis(20));
        }

        let kill = Command::new("kill")
            .arg(signal)
            .arg(child.id().to_string())
            .status()
            .expect("run kill");
        assert!(kill.success(), "kill {signal} failed");

        let status = child.wait().expect("wait launcher");
        assert_eq!(status.code(), Some(3), "after kill {signal}");
    }
}
