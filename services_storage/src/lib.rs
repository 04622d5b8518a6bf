//! # Storage Service
//!
//! This crate provides byte storage for archive namespace entries.
//!
//! ## Design
//!
//! - **InMemoryChannel**: growable, seekable byte buffer with a cursor
//! - **ContentStream**: independent snapshot reader over a channel's content
//! - **MemoryFile**: the content of one file entry, owning one channel
//! - **Asset**: anything whose full content can be streamed from offset 0
//!
//! Nothing here touches a disk; every read and write is a memory copy.

pub mod channel;
pub mod file;

pub use channel::{ChannelError, ChannelResult, ContentStream, InMemoryChannel};
pub use file::{Asset, MemoryFile};
