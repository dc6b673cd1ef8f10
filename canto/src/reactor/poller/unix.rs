use libc::{POLLERR, POLLHUP, POLLIN, POLLNVAL, POLLOUT, c_int, nfds_t, poll, pollfd};
use std::io;
use std::os::fd::RawFd;
use std::time::Duration;

/// `revents` bits that make a read waiter runnable.
pub(crate) const READ_READY: i16 = POLLIN | POLLERR | POLLHUP | POLLNVAL;

/// `revents` bits that make a write waiter runnable.
pub(crate) const WRITE_READY: i16 = POLLOUT | POLLERR | POLLHUP | POLLNVAL;

/// Builds a `pollfd` entry for `fd` with the requested event mask.
pub(crate) fn sys_pollfd(fd: RawFd, read: bool, write: bool) -> pollfd {
    let mut events = 0;

    if read {
        events |= POLLIN;
    }
    if write {
        events |= POLLOUT;
    }

    pollfd {
        fd,
        events,
        revents: 0,
    }
}

/// Waits on `fds` using `poll(2)`.
///
/// Returns the number of entries with a non-zero `revents`. An interrupted
/// call (`EINTR`) reports zero ready descriptors instead of an error.
pub(crate) fn sys_poll(fds: &mut [pollfd], timeout: Option<Duration>) -> io::Result<usize> {
    let rc = unsafe { poll(fds.as_mut_ptr(), fds.len() as nfds_t, timeout_millis(timeout)) };

    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(0);
        }
        return Err(err);
    }

    Ok(rc as usize)
}

/// Converts an optional timeout to the millisecond argument of `poll(2)`.
///
/// `None` maps to `-1` (block indefinitely). Partial milliseconds are
/// rounded up: truncating them to zero would turn the last stretch before a
/// deadline into a busy loop.
pub(crate) fn timeout_millis(timeout: Option<Duration>) -> c_int {
    match timeout {
        None => -1,
        Some(t) => t.as_nanos().div_ceil(1_000_000).min(c_int::MAX as u128) as c_int,
    }
}

#[cfg(test)]
mod tests {
    use super::timeout_millis;
    use std::time::Duration;

    #[test]
    fn test_timeout_rounds_up() {
        assert_eq!(timeout_millis(None), -1);
        assert_eq!(timeout_millis(Some(Duration::ZERO)), 0);
        assert_eq!(timeout_millis(Some(Duration::from_micros(400))), 1);
        assert_eq!(timeout_millis(Some(Duration::from_millis(25))), 25);
        assert_eq!(timeout_millis(Some(Duration::from_secs(u64::MAX))), i32::MAX);
    }
}
