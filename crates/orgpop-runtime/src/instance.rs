use crate::{Error, Result};
use std::io::ErrorKind;
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};

/// Fixed wire token; the only message kind that exists.
pub const TOGGLE_TOKEN: &[u8] = b"toggle";

/// Rendezvous name shared by every orgpop invocation on a machine.
pub const DEFAULT_INSTANCE_NAME: &str = "orgpop";

/// Outcome of a claim attempt.
pub enum Acquired {
    /// This process now holds the rendezvous point and must keep the lock
    /// alive for as long as its window is open.
    Primary(InstanceLock),

    /// Another instance already holds it; the toggle token was sent and
    /// this process should exit successfully without opening a window.
    Signaled,
}

/// Ownership of the named rendezvous socket.
///
/// The socket is nonblocking; register the raw fd with the host event loop
/// and call [`InstanceLock::dispatch`] whenever it becomes readable. The
/// socket path is unlinked on drop.
pub struct InstanceLock {
    socket: UnixDatagram,
    path: PathBuf,
}

/// Claim the process-wide rendezvous point for `name`.
///
/// Contention is not an error: when the point is already held, the holder
/// is signaled instead and `Acquired::Signaled` is returned. Any other
/// bind failure is fatal.
pub fn acquire(name: &str) -> Result<Acquired> {
    acquire_at(socket_path(name))
}

/// Socket path for an instance name: `<runtime-dir>/<name>.sock`, with a
/// uid-scoped temp-dir fallback for systems without a runtime directory.
pub fn socket_path(name: &str) -> PathBuf {
    match dirs::runtime_dir() {
        Some(dir) => dir.join(format!("{name}.sock")),
        None => {
            let uid = unsafe { libc::getuid() };
            std::env::temp_dir().join(format!("{name}-{uid}.sock"))
        }
    }
}

/// Claim a specific socket path. Split out from [`acquire`] so tests can
/// rendezvous inside a private directory.
pub fn acquire_at(path: PathBuf) -> Result<Acquired> {
    match UnixDatagram::bind(&path) {
        Ok(socket) => Ok(Acquired::Primary(InstanceLock::new(socket, path)?)),

        Err(err) if err.kind() == ErrorKind::AddrInUse => {
            let client = UnixDatagram::unbound().map_err(|e| lock_error(&path, "open", e))?;
            match client.send_to(TOGGLE_TOKEN, &path) {
                Ok(_) => Ok(Acquired::Signaled),

                // Nobody is listening: the previous holder died without
                // unlinking its socket. Reclaim the path once.
                Err(send_err) if send_err.kind() == ErrorKind::ConnectionRefused => {
                    std::fs::remove_file(&path).map_err(|e| lock_error(&path, "unlink", e))?;
                    let socket =
                        UnixDatagram::bind(&path).map_err(|e| lock_error(&path, "bind", e))?;
                    Ok(Acquired::Primary(InstanceLock::new(socket, path)?))
                }

                Err(send_err) => Err(lock_error(&path, "signal", send_err)),
            }
        }

        Err(err) => Err(lock_error(&path, "bind", err)),
    }
}

fn lock_error(path: &Path, action: &str, err: std::io::Error) -> Error {
    Error::Lock(format!("failed to {} {}: {}", action, path.display(), err))
}

impl InstanceLock {
    fn new(socket: UnixDatagram, path: PathBuf) -> Result<Self> {
        socket
            .set_nonblocking(true)
            .map_err(|e| lock_error(&path, "configure", e))?;
        Ok(Self { socket, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending datagrams without blocking, invoking `on_toggle` once
    /// per received toggle token. Foreign payloads are ignored.
    ///
    /// Returns the number of toggle messages delivered. Meant to be called
    /// from the host event loop when the fd reports readable; it never
    /// waits for a message.
    pub fn dispatch<F: FnMut()>(&self, mut on_toggle: F) -> Result<usize> {
        let mut buf = [0u8; 64];
        let mut delivered = 0;

        loop {
            match self.socket.recv_from(&mut buf) {
                Ok((len, _)) => {
                    if &buf[..len] == TOGGLE_TOKEN {
                        delivered += 1;
                        on_toggle();
                    }
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => return Ok(delivered),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::Io(err)),
            }
        }
    }
}

impl AsRawFd for InstanceLock {
    fn as_raw_fd(&self) -> RawFd {
        self.socket.as_raw_fd()
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
