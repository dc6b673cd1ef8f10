use super::stream::TcpStream;
use crate::runtime::scheduler::Scheduler;

use std::io;
use std::net::{self, SocketAddr, ToSocketAddrs};
use std::os::fd::{AsRawFd, RawFd};

/// A TCP listener driven by a [`Scheduler`].
///
/// `TcpListener` accepts incoming connections without blocking the
/// scheduler thread: a task awaiting [`accept`](Self::accept) is parked in
/// the readiness registry until a connection is pending.
pub struct TcpListener {
    inner: net::TcpListener,
    scheduler: Scheduler,
}

impl TcpListener {
    /// Binds a TCP listener to `address`.
    ///
    /// The socket is switched to non-blocking mode before it is returned.
    pub fn bind<A: ToSocketAddrs>(scheduler: &Scheduler, address: A) -> io::Result<Self> {
        Self::from_std(scheduler, net::TcpListener::bind(address)?)
    }

    /// Wraps an already bound `std` listener.
    pub fn from_std(scheduler: &Scheduler, listener: net::TcpListener) -> io::Result<Self> {
        listener.set_nonblocking(true)?;

        Ok(Self {
            inner: listener,
            scheduler: scheduler.clone(),
        })
    }

    /// Accepts an incoming TCP connection.
    ///
    /// Suspends the current task until a client connects, then returns a
    /// [`TcpStream`] and the peer address.
    pub async fn accept(&self) -> io::Result<(TcpStream, SocketAddr)> {
        let (stream, address) = self.scheduler.accept(&self.inner).await?;

        Ok((TcpStream::from_nonblocking(&self.scheduler, stream), address))
    }

    /// Returns the local socket address of this listener.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}

impl AsRawFd for TcpListener {
    fn as_raw_fd(&self) -> RawFd {
        self.inner.as_raw_fd()
    }
}
