//! File handles backed by in-memory channels
//!
//! A [`MemoryFile`] is the content of one file entry in an archive
//! namespace. It owns exactly one [`InMemoryChannel`] and exposes the
//! channel's operations unchanged, plus the whole-content view required by
//! [`Asset`] consumers such as exporters.

use crate::channel::{ChannelResult, ContentStream, InMemoryChannel};
use core_types::{NamespaceBound, NamespaceId};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Something whose full content can be streamed from the beginning
pub trait Asset {
    /// Opens a fresh reader over the full content
    fn open_stream(&self) -> ChannelResult<ContentStream>;
}

/// A namespace file entry's content
#[derive(Debug, Clone)]
pub struct MemoryFile {
    /// Namespace this file lives in
    namespace: NamespaceId,
    /// Backing channel
    channel: InMemoryChannel,
}

impl MemoryFile {
    /// Creates an empty file owned by `namespace`
    pub fn new(namespace: NamespaceId) -> Self {
        Self::from_channel(namespace, InMemoryChannel::new())
    }

    /// Creates a file seeded with existing bytes
    pub fn with_contents(namespace: NamespaceId, data: Vec<u8>) -> Self {
        Self::from_channel(namespace, InMemoryChannel::with_contents(data))
    }

    /// Wraps an existing channel
    pub fn from_channel(namespace: NamespaceId, channel: InMemoryChannel) -> Self {
        Self { namespace, channel }
    }

    pub fn is_open(&self) -> bool {
        self.channel.is_open()
    }

    pub fn close(&mut self) -> ChannelResult<()> {
        self.channel.close()
    }

    pub fn read(&mut self, dst: &mut [u8]) -> ChannelResult<Option<usize>> {
        self.channel.read(dst)
    }

    pub fn write(&mut self, src: &[u8]) -> ChannelResult<usize> {
        self.channel.write(src)
    }

    pub fn position(&self) -> ChannelResult<u64> {
        self.channel.position()
    }

    pub fn set_position(&mut self, new_position: u64) -> ChannelResult<&mut Self> {
        self.channel.set_position(new_position)?;
        Ok(self)
    }

    pub fn size(&self) -> ChannelResult<u64> {
        self.channel.size()
    }

    pub fn truncate(&mut self, new_size: u64) -> ChannelResult<&mut Self> {
        self.channel.truncate(new_size)?;
        Ok(self)
    }

    /// Replaces the whole content and rewinds the cursor
    pub fn replace_contents(&mut self, data: &[u8]) -> ChannelResult<()> {
        self.channel.truncate(0)?;
        self.channel.set_position(0)?;
        self.channel.write(data)?;
        self.channel.set_position(0)?;
        Ok(())
    }

    /// Borrows the backing channel
    pub fn channel(&self) -> &InMemoryChannel {
        &self.channel
    }

    /// Mutably borrows the backing channel
    pub fn channel_mut(&mut self) -> &mut InMemoryChannel {
        &mut self.channel
    }
}

impl Asset for MemoryFile {
    fn open_stream(&self) -> ChannelResult<ContentStream> {
        self.channel.open_stream()
    }
}

impl NamespaceBound for MemoryFile {
    fn namespace_id(&self) -> NamespaceId {
        self.namespace
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(&mut self.channel, buf)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut self.channel, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.channel.flush()
    }
}

impl Seek for MemoryFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.channel.seek(pos)
    }
}
