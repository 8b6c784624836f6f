use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[cfg(unix)]
use orgpop_runtime::instance::InstanceLock;

const POLL_INTERVAL_MS: i32 = 200;

/// Stay resident until a toggle message arrives or the process is
/// interrupted.
///
/// Readiness on the lock socket is level-triggered: the loop polls the
/// fd with a timeout and lets the lock dispatch whatever is pending.
/// Nothing here blocks on a receive.
#[cfg(unix)]
pub fn run(lock: Option<&InstanceLock>) -> Result<()> {
    let interrupted = interrupt_flag()?;
    let mut toggled = false;

    while !toggled && !interrupted.load(Ordering::SeqCst) {
        match lock {
            Some(lock) => {
                if wait_readable(lock, POLL_INTERVAL_MS)? {
                    lock.dispatch(|| toggled = true)?;
                }
            }
            None => std::thread::sleep(Duration::from_millis(POLL_INTERVAL_MS as u64)),
        }
    }

    Ok(())
}

#[cfg(not(unix))]
pub fn run() -> Result<()> {
    let interrupted = interrupt_flag()?;
    while !interrupted.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(POLL_INTERVAL_MS as u64));
    }
    Ok(())
}

fn interrupt_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;
    Ok(flag)
}

#[cfg(unix)]
fn wait_readable(lock: &InstanceLock, timeout_ms: i32) -> Result<bool> {
    use std::os::unix::io::AsRawFd;

    let mut fds = libc::pollfd {
        fd: lock.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };

    let rc = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if rc < 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err.into());
    }

    Ok(rc > 0 && fds.revents & libc::POLLIN != 0)
}
