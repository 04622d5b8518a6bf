//! Namespace entry types
//!
//! An entry is either a directory (no content) or a file owning one
//! [`MemoryFile`].

use serde::{Deserialize, Serialize};
use services_storage::MemoryFile;
use std::fmt;

/// Kind of a namespace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Holds other entries, no content
    Directory,
    /// Holds bytes
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "Directory"),
            EntryKind::File => write!(f, "File"),
        }
    }
}

/// A single namespace entry
#[derive(Debug, Clone)]
pub enum Node {
    Directory,
    File(MemoryFile),
}

impl Node {
    /// Returns the entry kind
    pub fn kind(&self) -> EntryKind {
        match self {
            Node::Directory => EntryKind::Directory,
            Node::File(_) => EntryKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory)
    }

    /// Returns the file content, or `None` for a directory
    pub fn as_file(&self) -> Option<&MemoryFile> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory => None,
        }
    }

    /// Mutable access to the file content
    pub fn as_file_mut(&mut self) -> Option<&mut MemoryFile> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::NamespaceId;

    #[test]
    fn test_entry_kind_display() {
        assert_eq!(format!("{}", EntryKind::Directory), "Directory");
        assert_eq!(format!("{}", EntryKind::File), "File");
    }

    #[test]
    fn test_directory_node() {
        let mut node = Node::Directory;
        assert_eq!(node.kind(), EntryKind::Directory);
        assert!(node.is_directory());
        assert!(node.as_file().is_none());
        assert!(node.as_file_mut().is_none());
    }

    #[test]
    fn test_file_node() {
        let file = MemoryFile::with_contents(NamespaceId::new(), b"data".to_vec());
        let mut node = Node::File(file);
        assert_eq!(node.kind(), EntryKind::File);
        assert!(!node.is_directory());
        assert_eq!(node.as_file().unwrap().size().unwrap(), 4);

        node.as_file_mut().unwrap().write(b"DA").unwrap();
        assert_eq!(
            node.as_file().unwrap().channel().open_stream().unwrap().into_inner(),
            b"DAta"
        );
    }
}
