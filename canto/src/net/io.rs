use crate::runtime::scheduler::Scheduler;
use crate::runtime::task::Work;
use crate::runtime::yield_now::switch;

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::os::fd::{AsRawFd, RawFd};

/// Errors after which the operation is simply retried on the next
/// readiness notification.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

impl Scheduler {
    /// Suspends the current task until `fd` is readable.
    async fn readable(&self, fd: RawFd, operation: &'static str) {
        let task = self.suspend_current(operation);
        self.register_read(fd, Work::Resumable(task));

        switch().await
    }

    /// Suspends the current task until `fd` is writable.
    async fn writable(&self, fd: RawFd, operation: &'static str) {
        let task = self.suspend_current(operation);
        self.register_write(fd, Work::Resumable(task));

        switch().await
    }

    /// Reads up to `max_bytes` from `source` once it becomes readable.
    ///
    /// The current task waits for readability first and only then performs
    /// the read. An empty buffer means the peer closed its end. If the
    /// readiness report turns out to be spurious, the task waits again.
    ///
    /// `source` should be in non-blocking mode.
    ///
    /// # Panics
    ///
    /// Panics if awaited outside a task running on this scheduler.
    pub async fn receive<S>(&self, source: &mut S, max_bytes: usize) -> io::Result<Vec<u8>>
    where
        S: Read + AsRawFd,
    {
        let fd = source.as_raw_fd();
        let mut buffer = vec![0; max_bytes];

        loop {
            self.readable(fd, "receive").await;

            match source.read(&mut buffer) {
                Ok(n) => {
                    buffer.truncate(n);
                    return Ok(buffer);
                }
                Err(err) if is_transient(&err) => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Writes `data` to `sink` once it becomes writable.
    ///
    /// Performs a single write and returns the number of bytes written,
    /// which may be less than `data.len()`.
    ///
    /// `sink` should be in non-blocking mode.
    ///
    /// # Panics
    ///
    /// Panics if awaited outside a task running on this scheduler.
    pub async fn send_bytes<S>(&self, sink: &mut S, data: &[u8]) -> io::Result<usize>
    where
        S: Write + AsRawFd,
    {
        let fd = sink.as_raw_fd();

        loop {
            self.writable(fd, "send_bytes").await;

            match sink.write(data) {
                Ok(n) => return Ok(n),
                Err(err) if is_transient(&err) => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Accepts a connection on `listener` once one is pending.
    ///
    /// The accepted stream is switched to non-blocking mode so it can be
    /// used with [`receive`](Self::receive) and
    /// [`send_bytes`](Self::send_bytes).
    ///
    /// # Panics
    ///
    /// Panics if awaited outside a task running on this scheduler.
    pub async fn accept(&self, listener: &TcpListener) -> io::Result<(TcpStream, SocketAddr)> {
        let fd = listener.as_raw_fd();

        loop {
            self.readable(fd, "accept").await;

            match listener.accept() {
                Ok((stream, address)) => {
                    stream.set_nonblocking(true)?;
                    return Ok((stream, address));
                }
                Err(err) if is_transient(&err) => continue,
                Err(err) => return Err(err),
            }
        }
    }
}
