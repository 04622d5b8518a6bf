//! Seekable in-memory byte channel
//!
//! An [`InMemoryChannel`] gives file content random-access read/write/resize
//! semantics without any backing device. The content is a growable `Vec<u8>`
//! and the cursor is a `u64` that may point past the end of the content:
//! reads there report end-of-data, writes there zero-fill the gap first.
//!
//! ## Lifecycle
//!
//! A channel is created open, either empty or seeded with existing bytes.
//! Once closed it stays closed; every operation except [`InMemoryChannel::is_open`]
//! then fails with [`ChannelError::Closed`].

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use thiserror::Error;

/// Errors that can occur during channel operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Channel was closed before the operation
    #[error("Channel is closed")]
    Closed,

    /// Cursor points beyond what this process can address
    #[error("Position {0} exceeds addressable memory")]
    PositionOverflow(u64),
}

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;

impl From<ChannelError> for io::Error {
    fn from(err: ChannelError) -> Self {
        let kind = match err {
            ChannelError::Closed => io::ErrorKind::BrokenPipe,
            ChannelError::PositionOverflow(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

/// A growable, seekable byte buffer with a read/write cursor
#[derive(Debug, Clone)]
pub struct InMemoryChannel {
    /// Stored content
    data: Vec<u8>,
    /// Cursor (may exceed `data.len()`)
    position: u64,
    /// Open/closed flag
    open: bool,
}

impl InMemoryChannel {
    /// Creates a new empty channel
    pub fn new() -> Self {
        Self::with_contents(Vec::new())
    }

    /// Creates a channel pre-seeded with existing content
    ///
    /// The cursor starts at 0.
    pub fn with_contents(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            open: true,
        }
    }

    /// Returns true until [`close`](Self::close) has been called
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closes the channel
    ///
    /// Closing an already closed channel is a no-op.
    pub fn close(&mut self) -> ChannelResult<()> {
        if self.open {
            log::trace!("channel closed size={}", self.data.len());
        }
        self.open = false;
        Ok(())
    }

    fn ensure_open(&self) -> ChannelResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(ChannelError::Closed)
        }
    }

    /// Reads into `dst` starting at the cursor
    ///
    /// Returns `None` (end of data) when the cursor is at or beyond the
    /// current size. Otherwise copies up to `dst.len()` bytes, advances the
    /// cursor by the amount copied and returns that amount.
    pub fn read(&mut self, dst: &mut [u8]) -> ChannelResult<Option<usize>> {
        self.ensure_open()?;

        let size = self.data.len() as u64;
        if self.position >= size {
            return Ok(None);
        }

        // position < size <= usize::MAX here
        let start = self.position as usize;
        let count = dst.len().min(self.data.len() - start);
        dst[..count].copy_from_slice(&self.data[start..start + count]);
        self.position += count as u64;
        Ok(Some(count))
    }

    /// Writes all of `src` at the cursor
    ///
    /// A cursor beyond the current size zero-fills the gap before the new
    /// bytes land. The cursor advances by `src.len()`.
    pub fn write(&mut self, src: &[u8]) -> ChannelResult<usize> {
        self.ensure_open()?;

        let start = usize::try_from(self.position)
            .map_err(|_| ChannelError::PositionOverflow(self.position))?;
        let end = start
            .checked_add(src.len())
            .filter(|&end| end <= isize::MAX as usize)
            .ok_or(ChannelError::PositionOverflow(self.position))?;

        if end > self.data.len() {
            self.data
                .try_reserve(end - self.data.len())
                .map_err(|_| ChannelError::PositionOverflow(self.position))?;
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(src);
        self.position = end as u64;
        Ok(src.len())
    }

    /// Returns the cursor
    pub fn position(&self) -> ChannelResult<u64> {
        self.ensure_open()?;
        Ok(self.position)
    }

    /// Moves the cursor
    ///
    /// There is no upper bound: positioning past the end is how sparse
    /// content is grown by the next write.
    pub fn set_position(&mut self, new_position: u64) -> ChannelResult<&mut Self> {
        self.ensure_open()?;
        self.position = new_position;
        Ok(self)
    }

    /// Returns the current content length in bytes
    pub fn size(&self) -> ChannelResult<u64> {
        self.ensure_open()?;
        Ok(self.data.len() as u64)
    }

    /// Discards all bytes beyond `new_size`
    ///
    /// Does nothing when `new_size` is not smaller than the current size.
    /// The cursor is left where it is, even if it now points past the end.
    pub fn truncate(&mut self, new_size: u64) -> ChannelResult<&mut Self> {
        self.ensure_open()?;
        if new_size < self.data.len() as u64 {
            self.data.truncate(new_size as usize);
        }
        Ok(self)
    }

    /// Opens an independent reader over the full content
    ///
    /// The stream is a snapshot starting at offset 0; reading from it does
    /// not move this channel's cursor, and later writes to the channel are
    /// not visible through it.
    pub fn open_stream(&self) -> ChannelResult<ContentStream> {
        self.ensure_open()?;
        Ok(ContentStream::new(self.data.clone()))
    }
}

impl Default for InMemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for InMemoryChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(InMemoryChannel::read(self, buf)?.unwrap_or(0))
    }
}

impl Write for InMemoryChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(InMemoryChannel::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ensure_open()?;
        Ok(())
    }
}

impl Seek for InMemoryChannel {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, offset) = match pos {
            SeekFrom::Start(n) => {
                self.set_position(n)?;
                return Ok(n);
            }
            SeekFrom::End(offset) => (self.size()?, offset),
            SeekFrom::Current(offset) => (self.position()?, offset),
        };

        let target = base.checked_add_signed(offset).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.set_position(target)?;
        Ok(target)
    }
}

/// Read-only view over a snapshot of channel content
#[derive(Debug, Clone)]
pub struct ContentStream {
    inner: Cursor<Vec<u8>>,
}

impl ContentStream {
    fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Total length of the snapshot
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Returns true if the snapshot holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the stream, returning the snapshot bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Read for ContentStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
