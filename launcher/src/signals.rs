//! Interrupt handling while the runtime owns the terminal.
//!
//! Terminal interrupts are delivered to the whole foreground process group,
//! so the runtime already receives them. The launcher ignores `SIGINT` and
//! `SIGQUIT` until the runtime exits so it can still report the runtime's
//! status, the same contract as `system(3)`.
#![allow(unsafe_code)]

#[cfg(unix)]
mod imp {
    use std::io;
    use std::os::unix::process::CommandExt;
    use std::process::Command;
    use std::sync::{Mutex, MutexGuard};

    use libc::{c_int, sighandler_t};
    use tracing::{debug, warn};

    const SIGNALS: [c_int; 2] = [libc::SIGINT, libc::SIGQUIT];

    /// Dispositions are process-wide; one guard at a time.
    static DISPOSITIONS: Mutex<()> = Mutex::new(());

    /// Ignores interrupts until dropped, then restores the previous handlers.
    ///
    /// Install it before spawning so there is no moment where an interrupt
    /// can kill the launcher and orphan a running child; the child gets the
    /// previous handlers back through [`InterruptGuard::restore_in_child`].
    pub struct InterruptGuard {
        previous: Vec<(c_int, sighandler_t)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl InterruptGuard {
        pub fn ignore() -> Self {
            let lock = lock_dispositions();
            let previous = ignore_interrupts();
            debug!(count = previous.len(), "interrupts ignored while child runs");
            Self {
                previous,
                _lock: lock,
            }
        }

        /// Make `cmd`'s child start with the handlers the launcher had before
        /// this guard, not with `SIG_IGN`.
        pub fn restore_in_child(&self, cmd: &mut Command) {
            let previous = self.previous.clone();
            // Only async-signal-safe calls between fork and exec.
            unsafe {
                cmd.pre_exec(move || {
                    for &(signal, handler) in &previous {
                        if libc::signal(signal, handler) == libc::SIG_ERR {
                            return Err(io::Error::last_os_error());
                        }
                    }
                    Ok(())
                });
            }
        }
    }

    impl Drop for InterruptGuard {
        fn drop(&mut self) {
            restore(&self.previous);
        }
    }

    pub(super) fn lock_dispositions() -> MutexGuard<'static, ()> {
        DISPOSITIONS
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set `SIG_IGN` and return what was installed before.
    pub(super) fn ignore_interrupts() -> Vec<(c_int, sighandler_t)> {
        let mut previous = Vec::with_capacity(SIGNALS.len());
        for signal in SIGNALS {
            let old = unsafe { libc::signal(signal, libc::SIG_IGN) };
            if old == libc::SIG_ERR {
                warn!(signal, err = %io::Error::last_os_error(), "failed to ignore signal");
            } else {
                previous.push((signal, old));
            }
        }
        previous
    }

    pub(super) fn restore(previous: &[(c_int, sighandler_t)]) {
        for &(signal, handler) in previous.iter().rev() {
            unsafe {
                libc::signal(signal, handler);
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use std::process::Command;

    /// No-op outside unix; console control events are left to the default handler.
    pub struct InterruptGuard;

    impl InterruptGuard {
        pub fn ignore() -> Self {
            Self
        }

        pub fn restore_in_child(&self, _cmd: &mut Command) {}
    }
}

pub use imp::InterruptGuard;
