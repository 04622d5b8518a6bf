//! Filesystem operations
//!
//! This module defines the operations provided by the archive filesystem.

use crate::config::ConfigError;
use crate::path::FsPath;
use fs_view::{ArchivePath, EntryKind, PathError};
use services_storage::{ChannelError, MemoryFile};
use thiserror::Error;

/// Errors that can occur during filesystem operations
#[derive(Debug, Error)]
pub enum OperationError {
    /// Path algebra error
    #[error("Path error: {0}")]
    PathError(#[from] PathError),

    /// Channel error while touching file content
    #[error("Channel error: {0}")]
    ChannelError(#[from] ChannelError),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// No entry at the path
    #[error("No such file or directory: {0}")]
    NotFound(String),

    /// Already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Not a file
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// Directory still has children
    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// Missing or unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem was closed
    #[error("File system is closed")]
    Closed,
}

/// Metadata information about an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatInfo {
    /// Path of the entry
    pub path: ArchivePath,
    /// Entry kind
    pub kind: EntryKind,
    /// Content size (files only)
    pub size: Option<u64>,
    /// Child count (directories only)
    pub entry_count: Option<usize>,
}

/// Filesystem operations trait
///
/// This trait defines the operations that can be performed on an archive
/// filesystem. Every path must belong to the filesystem's namespace.
pub trait FileSystemOperations {
    /// List directory contents
    fn ls(&self, path: &FsPath) -> Result<Vec<FsPath>, OperationError>;

    /// Get entry metadata
    fn stat(&self, path: &FsPath) -> Result<StatInfo, OperationError>;

    /// Check whether an entry exists
    fn exists(&self, path: &FsPath) -> Result<bool, OperationError>;

    /// Delete an entry
    ///
    /// Directories must be empty.
    fn delete(&mut self, path: &FsPath) -> Result<(), OperationError>;

    /// Create a directory
    ///
    /// The parent must already exist.
    fn create_directory(&mut self, path: &FsPath) -> Result<FsPath, OperationError>;

    /// Create a directory and any missing parents
    fn create_directories(&mut self, path: &FsPath) -> Result<FsPath, OperationError>;

    /// Create an empty file and return its handle
    fn create_file(&mut self, path: &FsPath) -> Result<&mut MemoryFile, OperationError>;

    /// Open the channel of an existing file
    fn open_channel(&mut self, path: &FsPath) -> Result<&mut MemoryFile, OperationError>;

    /// Read the whole content of a file
    fn read_all(&self, path: &FsPath) -> Result<Vec<u8>, OperationError>;

    /// Create or replace a file with `data`
    fn write_all(&mut self, path: &FsPath, data: &[u8]) -> Result<(), OperationError>;
}
