//! Exclusive, seek-addressed read sessions over the engine.
//!
//! A [`FibDevice`] hands out at most one [`Session`] at a time. The session
//! offset selects the Fibonacci index; reading copies the decimal digits and
//! a NUL terminator into the caller's buffer. Exclusivity lives here, not in
//! the engine, which stays reentrant.

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

use fibdrv_core::calculator::FibError;
use fibdrv_core::fastdoubling::FastDoublingEngine;
use fibdrv_core::options::Options;

/// Errors surfaced by a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Another session currently holds the device.
    #[error("device is in use")]
    Busy,

    /// The caller's buffer cannot hold the digits and the terminator.
    #[error("buffer too small: {needed} bytes needed, {available} available")]
    BufferTooSmall {
        /// Bytes required, terminator included.
        needed: usize,
        /// Bytes the caller provided.
        available: usize,
    },

    /// The computation itself failed.
    #[error(transparent)]
    Fib(#[from] FibError),
}

/// Origin for [`Session::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset.
    Set,
    /// Relative to the current offset.
    Cur,
    /// Measured backwards from the maximum offset.
    End,
}

/// A single-session Fibonacci device.
pub struct FibDevice {
    engine: FastDoublingEngine,
    max_offset: u64,
    lock: Mutex<()>,
}

impl FibDevice {
    /// Create a device using the capacity and offset limit from `opts`.
    #[must_use]
    pub fn new(opts: &Options) -> Self {
        Self {
            engine: FastDoublingEngine::new(opts.capacity()),
            max_offset: opts.max_offset,
            lock: Mutex::new(()),
        }
    }

    /// Largest offset a session can seek to.
    #[must_use]
    pub fn max_offset(&self) -> u64 {
        self.max_offset
    }

    /// Open a session, failing with `Busy` while another one is open.
    ///
    /// # Example
    /// ```
    /// use fibdrv_core::options::Options;
    /// use fibdrv_service::session::{FibDevice, SessionError, Whence};
    ///
    /// let device = FibDevice::new(&Options::default());
    /// let mut session = device.open().unwrap();
    /// assert!(matches!(device.open(), Err(SessionError::Busy)));
    ///
    /// session.seek(10, Whence::Set);
    /// let mut buf = [0u8; 8];
    /// let n = session.read(&mut buf).unwrap();
    /// assert_eq!(&buf[..n], b"55\0");
    /// ```
    pub fn open(&self) -> Result<Session<'_>, SessionError> {
        let Some(guard) = self.lock.try_lock() else {
            warn!("fibdrv is in use");
            return Err(SessionError::Busy);
        };
        debug!("session opened");
        Ok(Session {
            device: self,
            _guard: guard,
            offset: 0,
        })
    }
}

/// An open session. Dropping it releases the device.
pub struct Session<'a> {
    device: &'a FibDevice,
    _guard: MutexGuard<'a, ()>,
    offset: u64,
}

impl Session<'_> {
    /// Current offset, i.e. the index the next read computes.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Move the offset and return the new position.
    ///
    /// The target is clamped to `[0, max_offset]`.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> u64 {
        let max = i128::from(self.device.max_offset);
        let target = match whence {
            Whence::Set => i128::from(offset),
            Whence::Cur => i128::from(self.offset) + i128::from(offset),
            Whence::End => max - i128::from(offset),
        };
        self.offset = u64::try_from(target.clamp(0, max)).unwrap_or(0);
        self.offset
    }

    /// Compute F(offset) and copy it, NUL-terminated, into `buf`.
    ///
    /// Returns the number of bytes written, terminator included. Nothing is
    /// written on error. The offset does not advance.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, SessionError> {
        let bytes = self.device.engine.compute(self.offset)?.to_nul_terminated();
        let needed = bytes.len();
        let Some(dest) = buf.get_mut(..needed) else {
            return Err(SessionError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        };
        dest.copy_from_slice(&bytes);
        debug!(offset = self.offset, bytes = needed, "read");
        Ok(needed)
    }

    /// Writes are accepted and ignored.
    pub fn write(&mut self, _buf: &[u8]) -> usize {
        1
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        debug!("session released");
    }
}
