//! Socket suspension points and TCP networking primitives.
//!
//! This module provides:
//! - the descriptor-level suspension helpers on
//!   [`Scheduler`](crate::Scheduler) ([`receive`](crate::Scheduler::receive),
//!   [`send_bytes`](crate::Scheduler::send_bytes),
//!   [`accept`](crate::Scheduler::accept)),
//! - [`TcpListener`] and [`TcpStream`], thin wrappers that bind a
//!   non-blocking `std::net` socket to a scheduler.

mod io;
pub mod tcp;

pub use tcp::{TcpListener, TcpStream};
