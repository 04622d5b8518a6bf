//! Namespace collaborator contract
//!
//! The path algebra never needs a namespace to compute anything. The
//! operations that need namespace truth (existence checks, URI rendering,
//! child enumeration) ask a [`NamespaceView`].

use crate::directory::EntryKind;
use crate::path::ArchivePath;
use core_types::NamespaceId;
use services_storage::MemoryFile;

/// Read-only view of a hierarchical archive namespace
pub trait NamespaceView {
    /// Identity token of this namespace
    fn id(&self) -> NamespaceId;

    /// Addressing prefix used to build URIs, ending in the separator
    fn root_identifier(&self) -> String;

    /// Returns true if an entry exists at `path` (the root always exists)
    fn contains(&self, path: &ArchivePath) -> bool;

    /// Kind of the entry at `path`, if any
    fn kind(&self, path: &ArchivePath) -> Option<EntryKind>;

    /// Content of the file entry at `path`, if it is a file
    fn content(&self, path: &ArchivePath) -> Option<&MemoryFile>;

    /// Direct children of `path`, sorted by canonical string
    fn children(&self, path: &ArchivePath) -> Vec<ArchivePath>;

    /// Returns true if `path` is a directory with at least one child
    fn has_children(&self, path: &ArchivePath) -> bool {
        !self.children(path).is_empty()
    }
}
