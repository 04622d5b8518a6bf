//! Archive filesystem implementation
//!
//! This module provides the filesystem facade that binds one
//! [`MemoryArchive`] to its configuration and implements
//! [`FileSystemOperations`] on top of it.

use crate::archive::MemoryArchive;
use crate::config::FileSystemConfig;
use crate::navigator::PathNavigator;
use crate::operations::{FileSystemOperations, OperationError, StatInfo};
use crate::path::FsPath;
use core_types::{NamespaceBound, NamespaceId};
use fs_view::{ArchivePath, EntryKind, NamespaceView, Node};
use services_storage::{Asset, MemoryFile};

/// A filesystem over an in-memory archive
#[derive(Debug)]
pub struct ArchiveFileSystem {
    /// Settings this filesystem was built from
    config: FileSystemConfig,
    /// Backing namespace
    archive: MemoryArchive,
    /// Open/closed flag
    open: bool,
}

impl ArchiveFileSystem {
    /// Creates a filesystem over a new empty archive
    pub fn new(config: FileSystemConfig) -> Result<Self, OperationError> {
        config.validate()?;
        let archive = MemoryArchive::from_config(&config);
        Ok(Self::build(config, archive))
    }

    /// Creates a filesystem over an existing archive
    ///
    /// The archive keeps its own identity and root identifier, so the
    /// configured URI scheme is validated but not applied here; it only
    /// shapes the root identifier of archives created by [`new`](Self::new).
    pub fn with_archive(
        config: FileSystemConfig,
        archive: MemoryArchive,
    ) -> Result<Self, OperationError> {
        config.validate()?;
        Ok(Self::build(config, archive))
    }

    fn build(config: FileSystemConfig, archive: MemoryArchive) -> Self {
        log::debug!(
            "archive filesystem opened namespace={} name={} root={}",
            archive.id(),
            config.archive_name.as_deref().unwrap_or("-"),
            archive.root_identifier()
        );
        Self {
            config,
            archive,
            open: true,
        }
    }

    /// Identity of the backing namespace
    pub fn id(&self) -> NamespaceId {
        self.archive.id()
    }

    /// Root identifier of the backing namespace
    pub fn root_uri(&self) -> String {
        self.archive.root_identifier()
    }

    pub fn config(&self) -> &FileSystemConfig {
        &self.config
    }

    pub fn archive(&self) -> &MemoryArchive {
        &self.archive
    }

    pub fn archive_mut(&mut self) -> &mut MemoryArchive {
        &mut self.archive
    }

    /// Consumes the filesystem, returning the archive
    pub fn into_archive(self) -> MemoryArchive {
        self.archive
    }

    /// Path operations backed by this filesystem's archive
    ///
    /// Fails with [`OperationError::Closed`] once the filesystem is closed.
    pub fn navigator(&self) -> Result<PathNavigator<'_, MemoryArchive>, OperationError> {
        if !self.open {
            return Err(OperationError::Closed);
        }
        Ok(PathNavigator::new(&self.archive))
    }

    /// Parses text into a path of this filesystem
    pub fn get_path(&self, text: &str) -> FsPath {
        FsPath::parse(self.id(), text)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closes the filesystem
    ///
    /// Every later operation fails with [`OperationError::Closed`]. Closing
    /// twice is a no-op.
    pub fn close(&mut self) {
        if self.open {
            log::debug!("archive filesystem closed namespace={}", self.id());
        }
        self.open = false;
    }

    /// Checks that the filesystem is open and `path` belongs to it
    fn bind<'p>(&self, path: &'p FsPath) -> Result<&'p ArchivePath, OperationError> {
        if !self.open {
            return Err(OperationError::Closed);
        }
        if path.namespace_id() != self.id() {
            return Err(OperationError::InvalidArgument(format!(
                "{} belongs to {}, not {}",
                path,
                path.namespace_id(),
                self.id()
            )));
        }
        Ok(path.archive_path())
    }

    /// Makes sure the parent of `path` exists as far as configuration allows
    fn prepare_parent(&mut self, path: &ArchivePath) -> Result<(), OperationError> {
        if !self.config.create_missing_parents {
            return Ok(());
        }
        match path.parent() {
            Some(parent) => self.archive.add_directory(&parent),
            None => Ok(()),
        }
    }

    fn file_mut(&mut self, path: &ArchivePath) -> Result<&mut MemoryFile, OperationError> {
        match self.archive.get_mut(path) {
            Some(Node::File(file)) => Ok(file),
            Some(Node::Directory) => Err(OperationError::NotAFile(path.to_string())),
            None if path.is_root() => Err(OperationError::NotAFile(path.to_string())),
            None => Err(OperationError::NotFound(path.to_string())),
        }
    }
}

impl FileSystemOperations for ArchiveFileSystem {
    fn ls(&self, path: &FsPath) -> Result<Vec<FsPath>, OperationError> {
        self.bind(path)?;
        self.navigator()?.read_dir(path)
    }

    fn stat(&self, path: &FsPath) -> Result<StatInfo, OperationError> {
        let target = self.bind(path)?;
        let kind = self
            .archive
            .kind(target)
            .ok_or_else(|| OperationError::NotFound(target.to_string()))?;

        let (size, entry_count) = match kind {
            EntryKind::Directory => (None, Some(self.archive.children(target).len())),
            // a closed channel has no observable size
            EntryKind::File => (
                self.archive.content(target).and_then(|f| f.size().ok()),
                None,
            ),
        };

        Ok(StatInfo {
            path: target.clone(),
            kind,
            size,
            entry_count,
        })
    }

    fn exists(&self, path: &FsPath) -> Result<bool, OperationError> {
        let target = self.bind(path)?;
        Ok(self.archive.contains(target))
    }

    fn delete(&mut self, path: &FsPath) -> Result<(), OperationError> {
        let target = self.bind(path)?;
        self.archive.remove(target)?;
        log::debug!("deleted path={} namespace={}", target, self.id());
        Ok(())
    }

    fn create_directory(&mut self, path: &FsPath) -> Result<FsPath, OperationError> {
        let target = self.bind(path)?;
        if self.archive.contains(target) {
            return Err(OperationError::AlreadyExists(target.to_string()));
        }
        self.archive.put(target.clone(), Node::Directory)?;
        Ok(path.clone())
    }

    fn create_directories(&mut self, path: &FsPath) -> Result<FsPath, OperationError> {
        let target = self.bind(path)?;
        if self.archive.kind(target) == Some(EntryKind::File) {
            return Err(OperationError::AlreadyExists(target.to_string()));
        }
        self.archive.add_directory(target)?;
        Ok(path.clone())
    }

    fn create_file(&mut self, path: &FsPath) -> Result<&mut MemoryFile, OperationError> {
        let target = self.bind(path)?;
        if self.archive.contains(target) {
            return Err(OperationError::AlreadyExists(target.to_string()));
        }
        self.prepare_parent(target)?;
        let file = MemoryFile::new(self.id());
        self.archive.put(target.clone(), Node::File(file))?;
        self.file_mut(target)
    }

    fn open_channel(&mut self, path: &FsPath) -> Result<&mut MemoryFile, OperationError> {
        let target = self.bind(path)?;
        self.file_mut(target)
    }

    fn read_all(&self, path: &FsPath) -> Result<Vec<u8>, OperationError> {
        let target = self.bind(path)?;
        let file = match self.archive.get(target) {
            Some(Node::File(file)) => file,
            Some(Node::Directory) => return Err(OperationError::NotAFile(target.to_string())),
            None if target.is_root() => return Err(OperationError::NotAFile(target.to_string())),
            None => return Err(OperationError::NotFound(target.to_string())),
        };
        Ok(file.open_stream()?.into_inner())
    }

    fn write_all(&mut self, path: &FsPath, data: &[u8]) -> Result<(), OperationError> {
        let target = self.bind(path)?;
        if self.archive.kind(target) == Some(EntryKind::Directory) {
            return Err(OperationError::NotAFile(target.to_string()));
        }
        self.prepare_parent(target)?;
        let file = MemoryFile::with_contents(self.id(), data.to_vec());
        self.archive.put(target.clone(), Node::File(file))?;
        log::trace!("wrote path={} bytes={}", target, data.len());
        Ok(())
    }
}
