//! Namespace-bound paths
//!
//! An [`FsPath`] is an [`ArchivePath`] tied to the namespace it was created
//! for. It offers the full path contract of a filesystem facade: algebra
//! delegated to the value type, plus comparisons that refuse to match paths
//! of other namespaces or other path implementations.

use core_types::{NamespaceBound, NamespaceId};
use fs_view::{ArchivePath, PathError};
use std::fmt;
use std::path::PathBuf;

/// Anything that can be compared with an [`FsPath`]
///
/// Implementations outside this crate report `None` (or another
/// namespace's identity) and then never match.
pub trait PathLike {
    /// Namespace this path belongs to, if it belongs to an archive namespace
    fn namespace(&self) -> Option<NamespaceId>;

    /// Textual form of the path
    fn path_string(&self) -> String;
}

/// Kinds of change events a watch service could deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    /// An entry was created
    Create,
    /// A file's content changed
    Modify,
    /// An entry was removed
    Delete,
}

/// An absolute path within one archive namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FsPath {
    /// The path value (first, so ordering follows the canonical string)
    path: ArchivePath,
    /// Owning namespace
    namespace: NamespaceId,
}

impl FsPath {
    /// Binds a path value to a namespace
    pub fn new(namespace: NamespaceId, path: ArchivePath) -> Self {
        Self { path, namespace }
    }

    /// Parses text and binds it to a namespace
    pub fn parse(namespace: NamespaceId, text: &str) -> Self {
        Self::new(namespace, ArchivePath::parse(text))
    }

    fn rebind(&self, path: ArchivePath) -> Self {
        Self::new(self.namespace, path)
    }

    /// Returns the underlying path value
    pub fn archive_path(&self) -> &ArchivePath {
        &self.path
    }

    /// Returns the canonical string
    pub fn as_str(&self) -> &str {
        self.path.as_str()
    }

    /// Always true: archive paths have no relative form
    pub fn is_absolute(&self) -> bool {
        true
    }

    /// Returns this path
    pub fn to_absolute_path(&self) -> Self {
        self.clone()
    }

    pub fn root(&self) -> Self {
        self.rebind(ArchivePath::root())
    }

    pub fn parent(&self) -> Option<Self> {
        self.path.parent().map(|p| self.rebind(p))
    }

    /// Full path for any non-root path; see [`ArchivePath::file_name`]
    pub fn file_name(&self) -> Option<Self> {
        self.path.file_name().map(|p| self.rebind(p))
    }

    pub fn name_count(&self) -> usize {
        self.path.name_count()
    }

    pub fn name(&self, index: isize) -> Result<Self, PathError> {
        Ok(self.rebind(self.path.name(index)?))
    }

    pub fn subpath(&self, begin: isize, end: isize) -> Result<Self, PathError> {
        Ok(self.rebind(self.path.subpath(begin, end)?))
    }

    /// Cumulative prefixes, shortest first
    pub fn components(&self) -> Vec<Self> {
        self.path
            .components()
            .into_iter()
            .map(|p| self.rebind(p))
            .collect()
    }

    /// Resolves `other` in the same namespace as this path
    ///
    /// Returns `None` when `other` is a foreign implementation or belongs to
    /// another namespace. Fails when `other` is absent.
    fn comparable(&self, other: Option<&dyn PathLike>) -> Result<Option<ArchivePath>, PathError> {
        let other = other.ok_or_else(|| {
            PathError::InvalidArgument("other path must be specified".to_string())
        })?;
        match other.namespace() {
            Some(ns) if ns == self.namespace => Ok(Some(ArchivePath::parse(&other.path_string()))),
            _ => Ok(None),
        }
    }

    /// Segment-wise prefix test
    ///
    /// False for paths of other namespaces or implementations;
    /// [`PathError::InvalidArgument`] when `other` is absent.
    pub fn starts_with(&self, other: Option<&dyn PathLike>) -> Result<bool, PathError> {
        Ok(self
            .comparable(other)?
            .is_some_and(|other| self.path.starts_with(&other)))
    }

    /// Prefix test against text parsed in this namespace
    pub fn starts_with_str(&self, other: Option<&str>) -> Result<bool, PathError> {
        let other = other.ok_or_else(|| {
            PathError::InvalidArgument("other path input must be specified".to_string())
        })?;
        let other = FsPath::parse(self.namespace, other);
        self.starts_with(Some(&other))
    }

    /// Suffix test: canonical equality within the same namespace
    pub fn ends_with(&self, other: Option<&dyn PathLike>) -> Result<bool, PathError> {
        Ok(self
            .comparable(other)?
            .is_some_and(|other| self.path.ends_with(&other)))
    }

    /// Suffix test against text parsed in this namespace
    pub fn ends_with_str(&self, other: Option<&str>) -> Result<bool, PathError> {
        let other = other.ok_or_else(|| {
            PathError::InvalidArgument("other path input must be specified".to_string())
        })?;
        let other = FsPath::parse(self.namespace, other);
        self.ends_with(Some(&other))
    }

    pub fn normalize(&self) -> Self {
        self.rebind(self.path.normalize())
    }

    /// Resolves `other`, which replaces this path
    ///
    /// Fails when `other` belongs to another namespace.
    pub fn resolve(&self, other: &FsPath) -> Result<Self, PathError> {
        self.check_same_namespace(other)?;
        Ok(self.rebind(self.path.resolve(&other.path)))
    }

    /// Resolves text parsed in this namespace
    pub fn resolve_str(&self, other: &str) -> Self {
        self.rebind(self.path.resolve(&ArchivePath::parse(other)))
    }

    pub fn resolve_sibling(&self, other: &FsPath) -> Result<Self, PathError> {
        self.check_same_namespace(other)?;
        Ok(self.rebind(self.path.resolve_sibling(&other.path)))
    }

    pub fn relativize(&self, other: &FsPath) -> Result<Self, PathError> {
        self.check_same_namespace(other)?;
        Ok(self.rebind(self.path.relativize(&other.path)?))
    }

    fn check_same_namespace(&self, other: &FsPath) -> Result<(), PathError> {
        if self.same_namespace(other) {
            Ok(())
        } else {
            Err(PathError::InvalidArgument(format!(
                "{} belongs to {}, not {}",
                other, other.namespace, self.namespace
            )))
        }
    }

    /// Renders this path under a namespace root identifier
    pub fn to_uri_string(&self, root_uri: &str) -> String {
        self.path.to_uri_string(root_uri)
    }

    /// Not offered: archive paths have no native file
    pub fn to_file(&self) -> Result<PathBuf, PathError> {
        Err(PathError::Unsupported(format!(
            "{} is associated with an in-memory archive, not the native filesystem",
            self.path
        )))
    }

    /// Not offered: archive paths do not deliver change events
    pub fn register(&self, _events: &[WatchEventKind]) -> Result<(), PathError> {
        Err(PathError::Unsupported(
            "Archive paths do not support registration with a watch service".to_string(),
        ))
    }
}

impl PathLike for FsPath {
    fn namespace(&self) -> Option<NamespaceId> {
        Some(self.namespace)
    }

    fn path_string(&self) -> String {
        self.path.to_string()
    }
}

impl NamespaceBound for FsPath {
    fn namespace_id(&self) -> NamespaceId {
        self.namespace
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

impl AsRef<ArchivePath> for FsPath {
    fn as_ref(&self) -> &ArchivePath {
        &self.path
    }
}

impl<'a> IntoIterator for &'a FsPath {
    type Item = FsPath;
    type IntoIter = std::vec::IntoIter<FsPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.components().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ForeignPath(&'static str);

    impl PathLike for ForeignPath {
        fn namespace(&self) -> Option<NamespaceId> {
            None
        }

        fn path_string(&self) -> String {
            self.0.to_string()
        }
    }

    fn bound(ns: NamespaceId, text: &str) -> FsPath {
        FsPath::parse(ns, text)
    }

    #[test]
    fn test_algebra_keeps_namespace() {
        let ns = NamespaceId::new();
        let path = bound(ns, "/a/b/c");

        assert!(path.is_absolute());
        assert_eq!(path.root().namespace_id(), ns);
        assert_eq!(path.parent().unwrap(), bound(ns, "/a/b"));
        assert_eq!(path.subpath(0, 2).unwrap(), bound(ns, "/a/b"));
        assert_eq!(path.name(0).unwrap(), bound(ns, "/a"));
        assert_eq!(path.file_name().unwrap(), path);
        assert_eq!(path.to_absolute_path(), path);
        assert!(path.components().iter().all(|c| c.namespace_id() == ns));
    }

    #[test]
    fn test_starts_with() {
        let ns = NamespaceId::new();
        let path = bound(ns, "/toplevel/second/third");

        assert!(path.starts_with(Some(&bound(ns, "/toplevel/second/"))).unwrap());
        assert!(path.starts_with_str(Some("/toplevel/second/")).unwrap());
        assert!(!path.starts_with(Some(&bound(ns, "/top"))).unwrap());
        assert!(!path
            .starts_with(Some(&bound(ns, "/toplevel/second/third/fourth")))
            .unwrap());
    }

    #[test]
    fn test_starts_with_foreign_is_false() {
        let ns = NamespaceId::new();
        let path = bound(ns, "/toplevel/second/third");

        assert!(!path.starts_with(Some(&ForeignPath("/toplevel"))).unwrap());
        let other_fs = bound(NamespaceId::new(), "/toplevel");
        assert!(!path.starts_with(Some(&other_fs)).unwrap());
    }

    #[test]
    fn test_absent_argument_is_invalid() {
        let path = bound(NamespaceId::new(), "/toplevel/second/third");

        assert!(matches!(path.starts_with(None), Err(PathError::InvalidArgument(_))));
        assert!(matches!(path.starts_with_str(None), Err(PathError::InvalidArgument(_))));
        assert!(matches!(path.ends_with(None), Err(PathError::InvalidArgument(_))));
        assert!(matches!(path.ends_with_str(None), Err(PathError::InvalidArgument(_))));
    }

    #[test]
    fn test_ends_with() {
        let ns = NamespaceId::new();
        let path = bound(ns, "/toplevel/second/third");

        assert!(path.ends_with(Some(&bound(ns, "toplevel/second/third"))).unwrap());
        assert!(path.ends_with_str(Some("/toplevel/second/third/")).unwrap());
        assert!(!path.ends_with(Some(&bound(ns, "/toplevel"))).unwrap());
        assert!(!path.ends_with(Some(&ForeignPath("/toplevel/second/third"))).unwrap());
        assert!(!path
            .ends_with(Some(&bound(NamespaceId::new(), "/toplevel/second/third")))
            .unwrap());
    }

    #[test]
    fn test_unsupported_operations() {
        let path = bound(NamespaceId::new(), "/toplevel");
        assert!(matches!(path.to_file(), Err(PathError::Unsupported(_))));
        assert!(matches!(
            path.register(&[WatchEventKind::Create]),
            Err(PathError::Unsupported(_))
        ));
        assert!(matches!(path.register(&[]), Err(PathError::Unsupported(_))));
    }

    #[test]
    fn test_composition() {
        let ns = NamespaceId::new();
        let path = bound(ns, "/a/b");
        let other = bound(ns, "/x");

        assert_eq!(path.normalize(), path);
        assert_eq!(path.resolve(&other).unwrap(), other);
        assert_eq!(path.resolve_str("x"), other);
        assert_eq!(path.resolve_sibling(&other).unwrap(), other);
        assert!(matches!(path.relativize(&other), Err(PathError::Unsupported(_))));

        let foreign = bound(NamespaceId::new(), "/x");
        assert!(matches!(path.resolve(&foreign), Err(PathError::InvalidArgument(_))));
    }

    #[test]
    fn test_ordering_follows_canonical_string() {
        let ns = NamespaceId::new();
        let mut paths = vec![bound(ns, "/b"), bound(ns, "/a/b"), bound(ns, "/a")];
        paths.sort();
        let names: Vec<&str> = paths.iter().map(FsPath::as_str).collect();
        assert_eq!(names, vec!["/a", "/a/b", "/b"]);
    }

    #[test]
    fn test_iterate() {
        let ns = NamespaceId::new();
        let path = bound(ns, "/a/b/c");
        let names: Vec<String> = (&path).into_iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["/a", "/a/b", "/a/b/c"]);
        assert_eq!((&path.root()).into_iter().count(), 0);
    }
}
