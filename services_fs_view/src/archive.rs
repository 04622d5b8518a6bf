//! In-memory archive namespace
//!
//! [`MemoryArchive`] is the namespace collaborator: a tree of directory and
//! file entries keyed by absolute path. The root always exists and is never
//! stored. Every stored entry's parent is either the root or a stored
//! directory.

use crate::config::FileSystemConfig;
use crate::operations::OperationError;
use core_types::NamespaceId;
use fs_view::{ArchivePath, EntryKind, NamespaceView, Node, ROOT, SEPARATOR};
use services_storage::MemoryFile;
use std::collections::BTreeMap;
use std::ops::Bound;

/// A hierarchical namespace of in-memory entries
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    /// Identity token
    id: NamespaceId,
    /// URI prefix of every path in this archive
    root_identifier: String,
    /// All entries except the root
    nodes: BTreeMap<ArchivePath, Node>,
}

impl MemoryArchive {
    /// Creates an empty archive with a fresh identity
    pub fn new(root_identifier: impl Into<String>) -> Self {
        Self::with_id(NamespaceId::new(), root_identifier)
    }

    /// Creates an empty archive with the given identity
    pub fn with_id(id: NamespaceId, root_identifier: impl Into<String>) -> Self {
        Self {
            id,
            root_identifier: root_identifier.into(),
            nodes: BTreeMap::new(),
        }
    }

    /// Creates an empty archive whose root identifier follows `config`
    pub fn from_config(config: &FileSystemConfig) -> Self {
        let id = NamespaceId::new();
        Self::with_id(id, config.root_uri(id))
    }

    /// Gets an entry (`None` for the root, which has no node)
    pub fn get(&self, path: &ArchivePath) -> Option<&Node> {
        self.nodes.get(path)
    }

    /// Gets a mutable entry
    pub fn get_mut(&mut self, path: &ArchivePath) -> Option<&mut Node> {
        self.nodes.get_mut(path)
    }

    /// Number of stored entries (the root is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all stored paths in canonical order
    pub fn paths(&self) -> impl Iterator<Item = &ArchivePath> {
        self.nodes.keys()
    }

    /// Inserts an entry whose parent already exists
    ///
    /// Returns the entry previously stored at `path`. Replacing a directory
    /// that still has children fails with `DirectoryNotEmpty`.
    pub fn put(&mut self, path: ArchivePath, node: Node) -> Result<Option<Node>, OperationError> {
        if path.is_root() {
            return Err(OperationError::InvalidArgument(
                "The root entry cannot be replaced".to_string(),
            ));
        }

        let parent = path.parent().unwrap_or_default();
        match self.kind(&parent) {
            Some(EntryKind::Directory) => {}
            Some(EntryKind::File) => return Err(OperationError::NotADirectory(parent.to_string())),
            None => return Err(OperationError::NotFound(parent.to_string())),
        }

        if matches!(self.nodes.get(&path), Some(Node::Directory)) && self.has_children(&path) {
            return Err(OperationError::DirectoryNotEmpty(path.to_string()));
        }

        log::debug!(
            "archive put namespace={} path={} kind={}",
            self.id,
            path,
            node.kind()
        );
        Ok(self.nodes.insert(path, node))
    }

    /// Adds a directory, creating missing parents
    ///
    /// Existing directories along the way are kept; a file in the way fails
    /// with `NotADirectory`.
    pub fn add_directory(&mut self, path: &ArchivePath) -> Result<(), OperationError> {
        for component in path.components() {
            match self.nodes.get(&component) {
                Some(Node::Directory) => {}
                Some(Node::File(_)) => {
                    return Err(OperationError::NotADirectory(component.to_string()))
                }
                None => {
                    log::debug!(
                        "archive add directory namespace={} path={}",
                        self.id,
                        component
                    );
                    self.nodes.insert(component, Node::Directory);
                }
            }
        }
        Ok(())
    }

    /// Adds a file with the given content, creating missing parents
    ///
    /// An existing file at `path` is replaced by a fresh one.
    pub fn add_file(&mut self, path: &ArchivePath, data: Vec<u8>) -> Result<(), OperationError> {
        let parent = path.parent().ok_or_else(|| {
            OperationError::InvalidArgument("The root cannot hold content".to_string())
        })?;
        self.add_directory(&parent)?;

        if let Some(Node::Directory) = self.nodes.get(path) {
            return Err(OperationError::NotAFile(path.to_string()));
        }
        self.put(
            path.clone(),
            Node::File(MemoryFile::with_contents(self.id, data)),
        )?;
        Ok(())
    }

    /// Removes an entry
    ///
    /// Fails with `NotFound` for a missing entry and `DirectoryNotEmpty` for
    /// a directory that still has children. The root cannot be removed.
    pub fn remove(&mut self, path: &ArchivePath) -> Result<Node, OperationError> {
        if path.is_root() {
            return Err(OperationError::InvalidArgument(
                "The root entry cannot be removed".to_string(),
            ));
        }
        match self.nodes.get(path) {
            None => return Err(OperationError::NotFound(path.to_string())),
            Some(Node::Directory) if self.has_children(path) => {
                return Err(OperationError::DirectoryNotEmpty(path.to_string()))
            }
            Some(_) => {}
        }

        log::debug!("archive remove namespace={} path={}", self.id, path);
        self.nodes
            .remove(path)
            .ok_or_else(|| OperationError::NotFound(path.to_string()))
    }
}

impl MemoryArchive {
    /// Stored paths under `prefix`, in canonical order
    ///
    /// Keys sharing a prefix are contiguous in the map, so the walk stops at
    /// the first key outside the subtree.
    fn descendants<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ArchivePath> + 'a {
        self.nodes
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(path, _)| path)
            .take_while(move |path| path.as_str().starts_with(prefix))
    }
}

/// Canonical string every descendant of `path` starts with
fn descendant_prefix(path: &ArchivePath) -> String {
    if path.is_root() {
        ROOT.to_string()
    } else {
        format!("{}{}", path, SEPARATOR)
    }
}

impl NamespaceView for MemoryArchive {
    fn id(&self) -> NamespaceId {
        self.id
    }

    fn root_identifier(&self) -> String {
        self.root_identifier.clone()
    }

    fn contains(&self, path: &ArchivePath) -> bool {
        path.is_root() || self.nodes.contains_key(path)
    }

    fn kind(&self, path: &ArchivePath) -> Option<EntryKind> {
        if path.is_root() {
            return Some(EntryKind::Directory);
        }
        self.nodes.get(path).map(Node::kind)
    }

    fn content(&self, path: &ArchivePath) -> Option<&MemoryFile> {
        self.nodes.get(path).and_then(Node::as_file)
    }

    fn children(&self, path: &ArchivePath) -> Vec<ArchivePath> {
        let prefix = descendant_prefix(path);
        self.descendants(&prefix)
            .filter(|candidate| !candidate.as_str()[prefix.len()..].contains(SEPARATOR))
            .cloned()
            .collect()
    }

    fn has_children(&self, path: &ArchivePath) -> bool {
        self.descendants(&descendant_prefix(path)).next().is_some()
    }
}
