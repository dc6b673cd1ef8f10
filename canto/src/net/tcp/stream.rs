use crate::runtime::scheduler::Scheduler;

use std::io;
use std::net::{self, Shutdown, SocketAddr};
use std::os::fd::{AsRawFd, RawFd};

/// A connected TCP stream driven by a [`Scheduler`].
///
/// Every operation waits for readiness first and then performs a single
/// non-blocking system call, so a task using the stream never blocks the
/// scheduler thread.
pub struct TcpStream {
    inner: net::TcpStream,
    scheduler: Scheduler,
}

impl TcpStream {
    /// Wraps a connected `std` stream and switches it to non-blocking mode.
    pub fn from_std(scheduler: &Scheduler, stream: net::TcpStream) -> io::Result<Self> {
        stream.set_nonblocking(true)?;

        Ok(Self::from_nonblocking(scheduler, stream))
    }

    pub(crate) fn from_nonblocking(scheduler: &Scheduler, stream: net::TcpStream) -> Self {
        Self {
            inner: stream,
            scheduler: scheduler.clone(),
        }
    }

    /// Receives up to `max_bytes`.
    ///
    /// Returns an empty buffer once the peer has closed the connection.
    pub async fn recv(&mut self, max_bytes: usize) -> io::Result<Vec<u8>> {
        self.scheduler.receive(&mut self.inner, max_bytes).await
    }

    /// Sends as much of `data` as one write accepts and returns the number
    /// of bytes written.
    pub async fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.scheduler.send_bytes(&mut self.inner, data).await
    }

    /// Sends the entire buffer.
    ///
    /// # Errors
    ///
    /// Returns `WriteZero` if a write reports progress of zero.
    pub async fn send_all(&mut self, mut data: &[u8]) -> io::Result<()> {
        while !data.is_empty() {
            let n = self.send(data).await?;

            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole buffer",
                ));
            }

            data = &data[n..];
        }

        Ok(())
    }

    /// Returns the address of the remote peer.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.inner.peer_addr()
    }

    /// Returns the local address of this stream.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Shuts down the read, write, or both halves of this connection.
    pub fn shutdown(&self, how: Shutdown) -> io::Result<()> {
        self.inner.shutdown(how)
    }
}

impl AsRawFd for TcpStream {
    fn as_raw_fd(&self) -> RawFd {
        self.inner.as_raw_fd()
    }
}
