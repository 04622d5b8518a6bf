//! # Archive Filesystem Service
//!
//! This service exposes an in-memory archive as a filesystem.
//!
//! ## Design
//!
//! - A [`MemoryArchive`] owns every entry; the root always exists
//! - An [`FsPath`] is a path value bound to one archive's identity token
//! - Paths of other archives are compared by identity, never matched
//! - File content is read and written through seekable in-memory channels
//! - Root identifiers are built from [`FileSystemConfig`], not constants
//!
//! ## Operations
//!
//! - `ls(path)`: List directory contents
//! - `stat(path)`: Get entry metadata
//! - `delete(path)`: Remove a file or an empty directory
//! - `create_directory(path)`: Create a directory under an existing parent
//! - `create_directories(path)`: Create a directory and its parents
//! - `create_file(path)` / `open_channel(path)`: Get a file's channel
//! - `read_all(path)` / `write_all(path, data)`: Whole-file access

pub mod archive;
pub mod config;
pub mod navigator;
pub mod operations;
pub mod path;
pub mod service;

pub use archive::MemoryArchive;
pub use config::{ConfigError, FileSystemConfig, DEFAULT_URI_SCHEME};
pub use navigator::PathNavigator;
pub use operations::{FileSystemOperations, OperationError, StatInfo};
pub use path::{FsPath, PathLike, WatchEventKind};
pub use service::ArchiveFileSystem;
