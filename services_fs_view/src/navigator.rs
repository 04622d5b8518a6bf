//! Namespace-aware path operations
//!
//! The path algebra is pure. [`PathNavigator`] covers the few operations
//! that need to ask a namespace: existence, real-path resolution, URI
//! rendering and directory iteration.

use crate::operations::OperationError;
use crate::path::FsPath;
use core_types::NamespaceBound;
use fs_view::{EntryKind, NamespaceView};

/// Path operations backed by one namespace
pub struct PathNavigator<'a, N: NamespaceView + ?Sized> {
    namespace: &'a N,
}

impl<'a, N: NamespaceView + ?Sized> PathNavigator<'a, N> {
    /// Creates a navigator over `namespace`
    pub fn new(namespace: &'a N) -> Self {
        Self { namespace }
    }

    /// Parses text into a path bound to this namespace
    pub fn get_path(&self, text: &str) -> FsPath {
        FsPath::parse(self.namespace.id(), text)
    }

    /// Rejects paths that belong to another namespace
    fn check_bound(&self, path: &FsPath) -> Result<(), OperationError> {
        if path.namespace_id() == self.namespace.id() {
            Ok(())
        } else {
            Err(OperationError::InvalidArgument(format!(
                "{} belongs to {}, not {}",
                path,
                path.namespace_id(),
                self.namespace.id()
            )))
        }
    }

    /// Returns true if the namespace holds an entry at `path`
    ///
    /// Paths of other namespaces never exist here.
    pub fn exists(&self, path: &FsPath) -> bool {
        self.check_bound(path).is_ok() && self.namespace.contains(path.archive_path())
    }

    /// Returns the real form of `path`
    ///
    /// There are no links, so this is an existence check that returns the
    /// same path.
    pub fn to_real_path(&self, path: &FsPath) -> Result<FsPath, OperationError> {
        self.check_bound(path)?;
        if !self.namespace.contains(path.archive_path()) {
            return Err(OperationError::NotFound(format!(
                "Path points to a nonexistent file or directory: {}",
                path
            )));
        }
        Ok(path.clone())
    }

    /// Renders `path` as a URI under the namespace root identifier
    pub fn to_uri(&self, path: &FsPath) -> Result<String, OperationError> {
        self.check_bound(path)?;
        Ok(path.to_uri_string(&self.namespace.root_identifier()))
    }

    /// Lists the direct children of a directory
    pub fn read_dir(&self, path: &FsPath) -> Result<Vec<FsPath>, OperationError> {
        self.check_bound(path)?;
        match self.namespace.kind(path.archive_path()) {
            Some(EntryKind::Directory) => Ok(self
                .namespace
                .children(path.archive_path())
                .into_iter()
                .map(|child| FsPath::new(self.namespace.id(), child))
                .collect()),
            Some(EntryKind::File) => Err(OperationError::NotADirectory(path.to_string())),
            None => Err(OperationError::NotFound(path.to_string())),
        }
    }
}
