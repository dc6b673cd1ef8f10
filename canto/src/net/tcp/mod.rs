//! TCP networking implementation.
//!
//! It is split into:
//! - [`listener`]: accepting incoming TCP connections,
//! - [`stream`]: sending and receiving on a connected stream.
//!
//! Both types keep a handle to the scheduler they were created with and
//! must only be used from tasks running on it.

pub mod listener;
pub mod stream;

pub use listener::TcpListener;
pub use stream::TcpStream;
