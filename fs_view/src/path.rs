//! Absolute path algebra
//!
//! This module parses textual locations into [`ArchivePath`] values and
//! answers structural questions about them. Every path is absolute: there is
//! no working directory, and input without a leading separator is treated as
//! if it had one.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between path segments
pub const SEPARATOR: char = '/';

/// Canonical string of the root path
pub const ROOT: &str = "/";

/// Errors that can occur during path operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Missing, malformed or out-of-range argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation is not offered by archive paths
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// An absolute path inside an archive namespace
///
/// The canonical form is the separator followed by the non-empty segments
/// joined with the separator; the root is the separator alone. Equality,
/// hashing and ordering all work on the canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ArchivePath {
    raw: String,
}

impl ArchivePath {
    /// Parses text into an absolute path
    ///
    /// Empty input is the root. Consecutive separators collapse and a
    /// trailing separator is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_view::ArchivePath;
    ///
    /// assert_eq!(ArchivePath::parse("").as_str(), "/");
    /// assert_eq!(ArchivePath::parse("docs/notes/").as_str(), "/docs/notes");
    /// assert_eq!(ArchivePath::parse("//docs//notes").as_str(), "/docs/notes");
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut raw = String::with_capacity(text.len() + 1);
        for segment in text.split(SEPARATOR).filter(|s| !s.is_empty()) {
            raw.push(SEPARATOR);
            raw.push_str(segment);
        }
        if raw.is_empty() {
            raw.push(SEPARATOR);
        }
        Self { raw }
    }

    /// Returns the root path
    pub fn root() -> Self {
        Self {
            raw: ROOT.to_string(),
        }
    }

    /// Returns true for the root path
    pub fn is_root(&self) -> bool {
        self.raw == ROOT
    }

    /// Returns the canonical string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Iterates over the segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.raw.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Appends one segment
    ///
    /// Fails if the segment is not a valid name (see [`is_valid_segment`]).
    pub fn child(&self, segment: &str) -> Result<Self, PathError> {
        if !is_valid_segment(segment) {
            return Err(PathError::InvalidArgument(format!(
                "Invalid path segment: {:?}",
                segment
            )));
        }
        let mut raw = if self.is_root() {
            String::with_capacity(segment.len() + 1)
        } else {
            self.raw.clone()
        };
        raw.push(SEPARATOR);
        raw.push_str(segment);
        Ok(Self { raw })
    }

    /// Returns the parent, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.raw.rfind(SEPARATOR) {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self {
                raw: self.raw[..idx].to_string(),
            }),
        }
    }

    /// Returns the file name, or `None` for the root
    ///
    /// Archive paths have no relative form, so the file name of a non-root
    /// path is the full absolute path, not its last segment.
    pub fn file_name(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else {
            Some(self.clone())
        }
    }

    /// Returns the last segment, or `None` for the root
    pub fn last_segment(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Returns the number of segments (0 for the root)
    pub fn name_count(&self) -> usize {
        let context = self.raw.trim_matches(SEPARATOR);
        if context.is_empty() {
            return 0;
        }
        count_occurrences(context, SEPARATOR) + 1
    }

    /// Returns `subpath(0, index + 1)`
    pub fn name(&self, index: isize) -> Result<Self, PathError> {
        self.subpath(0, index.saturating_add(1))
    }

    /// Returns the path made of the leading segments up to `end`
    ///
    /// `begin` selects nothing by itself but must name an existing segment;
    /// the result is always anchored at the root, so `subpath(1, 2)` on
    /// `/a/b/c` is `/a/b`.
    ///
    /// Fails with [`PathError::InvalidArgument`] when `begin < 0`,
    /// `end < 0`, `end <= begin`, `begin >= name_count()` or
    /// `end > name_count()`.
    pub fn subpath(&self, begin: isize, end: isize) -> Result<Self, PathError> {
        if begin < 0 {
            return Err(PathError::InvalidArgument(
                "Begin index must not be negative".to_string(),
            ));
        }
        if end < 0 {
            return Err(PathError::InvalidArgument(
                "End index must not be negative".to_string(),
            ));
        }
        if end <= begin {
            return Err(PathError::InvalidArgument(
                "End index must be greater than begin index".to_string(),
            ));
        }

        let count = self.name_count();
        let (begin, end) = (begin as usize, end as usize);
        if begin >= count {
            return Err(PathError::InvalidArgument(format!(
                "Invalid begin index {} for {}; must be between 0 and {} exclusive",
                begin, self.raw, count
            )));
        }
        if end > count {
            return Err(PathError::InvalidArgument(format!(
                "Invalid end index {} for {}; must be between 0 and {} inclusive",
                end, self.raw, count
            )));
        }

        let mut raw = String::new();
        for segment in self.segments().take(end) {
            raw.push(SEPARATOR);
            raw.push_str(segment);
        }
        Ok(Self { raw })
    }

    /// Segment-wise prefix test
    ///
    /// `/a/bc` starts with `/a` but not with `/a/b`.
    pub fn starts_with(&self, other: &ArchivePath) -> bool {
        let mut ours = self.segments();
        other
            .segments()
            .all(|theirs| ours.next() == Some(theirs))
    }

    /// Suffix test
    ///
    /// Every path is absolute, so a path only ends with itself.
    pub fn ends_with(&self, other: &ArchivePath) -> bool {
        self.raw == other.raw
    }

    /// Returns the cumulative prefixes, shortest first
    ///
    /// `/a/b/c` yields `/a`, `/a/b`, `/a/b/c`; the root yields nothing.
    pub fn components(&self) -> Vec<ArchivePath> {
        let mut out = Vec::with_capacity(self.name_count());
        let mut current = String::new();
        for segment in self.segments() {
            current.push(SEPARATOR);
            current.push_str(segment);
            out.push(Self {
                raw: current.clone(),
            });
        }
        out
    }

    /// Renders this path under a namespace root identifier
    ///
    /// The root identifier already ends in the separator, so the path's own
    /// leading separator is not repeated.
    pub fn to_uri_string(&self, root_uri: &str) -> String {
        if root_uri.ends_with(SEPARATOR) {
            format!("{}{}", root_uri, &self.raw[1..])
        } else {
            format!("{}{}", root_uri, self.raw)
        }
    }

    /// Returns the path unchanged
    ///
    /// Canonical paths hold no empty segments, and `.`/`..` are ordinary
    /// names here.
    pub fn normalize(&self) -> Self {
        self.clone()
    }

    /// Resolves `other` against this path
    ///
    /// `other` is absolute, so it replaces this path.
    pub fn resolve(&self, other: &ArchivePath) -> Self {
        other.clone()
    }

    /// Resolves `other` against this path's parent
    ///
    /// Same rule as [`resolve`](Self::resolve).
    pub fn resolve_sibling(&self, other: &ArchivePath) -> Self {
        other.clone()
    }

    /// Not offered: there is no relative form to produce
    pub fn relativize(&self, other: &ArchivePath) -> Result<Self, PathError> {
        Err(PathError::Unsupported(format!(
            "Cannot relativize {} against {}: archive paths are always absolute",
            other, self
        )))
    }
}

/// Counts `c` in `s` with a single forward scan
fn count_occurrences(s: &str, c: char) -> usize {
    let mut count = 0;
    let mut rest = s;
    while let Some(idx) = rest.find(c) {
        count += 1;
        rest = &rest[idx + c.len_utf8()..];
    }
    count
}

/// Validates a single path segment
///
/// Returns true if the name can appear between two separators.
pub fn is_valid_segment(name: &str) -> bool {
    !name.is_empty() && !name.contains(SEPARATOR) && !name.contains('\0')
}

impl Default for ArchivePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// Lets ordered maps keyed by path be searched by canonical string
impl Borrow<str> for ArchivePath {
    fn borrow(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for ArchivePath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for ArchivePath {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<ArchivePath> for String {
    fn from(path: ArchivePath) -> Self {
        path.raw
    }
}

impl FromStr for ArchivePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> IntoIterator for &'a ArchivePath {
    type Item = ArchivePath;
    type IntoIter = std::vec::IntoIter<ArchivePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.components().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> ArchivePath {
        ArchivePath::parse(text)
    }

    #[test]
    fn test_empty_string_is_root() {
        assert_eq!(p(""), ArchivePath::root());
        assert_eq!(p("/"), ArchivePath::root());
        assert_eq!(p("///"), ArchivePath::root());
        assert!(p("").is_root());
    }

    #[test]
    fn test_relative_corrected_to_absolute() {
        assert_eq!(p("relativePath").as_str(), "/relativePath");
        assert_eq!(p("x"), p("/x"));
    }

    #[test]
    fn test_trailing_and_double_separators_collapse() {
        assert_eq!(p("/toplevel/").as_str(), "/toplevel");
        assert_eq!(p("docs//notes.txt").as_str(), "/docs/notes.txt");
        assert_eq!(
            p("a//b/").segments().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_segments_roundtrip() {
        let cases: Vec<Vec<&str>> = vec![
            vec![],
            vec!["a"],
            vec!["a", "b", "c"],
            vec!["with space", "..", "."],
        ];
        for segments in cases {
            let joined = segments.join("/");
            let path = p(&joined);
            assert_eq!(path.segments().collect::<Vec<_>>(), segments);
            assert_eq!(path.name_count(), segments.len());
        }
    }

    #[test]
    fn test_root() {
        assert_eq!(ArchivePath::root().as_str(), ROOT);
        assert_eq!(ArchivePath::default(), ArchivePath::root());
        assert_eq!(ArchivePath::root().name_count(), 0);
        assert!(!p("someNode/child").is_root());
    }

    #[test]
    fn test_parent() {
        assert_eq!(p("parent/child").parent().unwrap().as_str(), "/parent");
        assert_eq!(
            p("parent/child/grandchild").parent().unwrap().as_str(),
            "/parent/child"
        );
        assert_eq!(p("/single").parent(), Some(ArchivePath::root()));
        assert_eq!(ArchivePath::root().parent(), None);
    }

    #[test]
    fn test_file_name_is_full_path() {
        let path = p("/dir/nestedDir/filename");
        assert_eq!(path.file_name().unwrap().as_str(), "/dir/nestedDir/filename");
        assert_eq!(ArchivePath::root().file_name(), None);
        assert_eq!(path.last_segment(), Some("filename"));
    }

    #[test]
    fn test_name_count() {
        assert_eq!(p("/").name_count(), 0);
        assert_eq!(p("/toplevel").name_count(), 1);
        assert_eq!(p("/toplevel/").name_count(), 1);
        assert_eq!(p("toplevel/").name_count(), 1);
        assert_eq!(p("toplevel/nested").name_count(), 2);
    }

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("", '/'), 0);
        assert_eq!(count_occurrences("abc", '/'), 0);
        assert_eq!(count_occurrences("a/b/c", '/'), 2);
        assert_eq!(count_occurrences("/a/", '/'), 2);
    }

    #[test]
    fn test_deep_name_count() {
        let deep = "d/".repeat(50_000);
        assert_eq!(p(&deep).name_count(), 50_000);
    }

    #[test]
    fn test_get_name() {
        let path = p("/toplevel/second/third");
        assert_eq!(path.name(2).unwrap().as_str(), "/toplevel/second/third");
        assert_eq!(path.name(0).unwrap().as_str(), "/toplevel");
        assert!(matches!(path.name(3), Err(PathError::InvalidArgument(_))));
        assert!(matches!(path.name(-1), Err(PathError::InvalidArgument(_))));
    }

    #[test]
    fn test_subpath() {
        let path = p("/toplevel/second/third");
        assert_eq!(path.subpath(1, 2).unwrap().as_str(), "/toplevel/second");
        assert_eq!(path.subpath(2, 3).unwrap(), path);
        assert_eq!(path.subpath(0, 1).unwrap().as_str(), "/toplevel");
    }

    #[test]
    fn test_subpath_rejects_bad_ranges() {
        let path = p("/toplevel/second/third");
        for (begin, end) in [(-1, 1), (0, -1), (2, 1), (1, 1), (4, 5), (3, 4), (2, 4)] {
            assert!(
                matches!(path.subpath(begin, end), Err(PathError::InvalidArgument(_))),
                "subpath({}, {}) should fail",
                begin,
                end
            );
        }
    }

    #[test]
    fn test_subpath_of_root_fails() {
        assert!(ArchivePath::root().subpath(0, 1).is_err());
    }

    #[test]
    fn test_starts_with() {
        let path = p("/toplevel/second/third");
        assert!(path.starts_with(&p("/toplevel/second/")));
        assert!(path.starts_with(&p("/toplevel")));
        assert!(path.starts_with(&path));
        assert!(path.starts_with(&ArchivePath::root()));
        assert!(!path.starts_with(&p("/top")));
        assert!(!path.starts_with(&p("/toplevel/second/third/fourth")));
        assert!(!path.starts_with(&p("/second")));
    }

    #[test]
    fn test_ends_with() {
        let path = p("/toplevel/second/third");
        assert!(path.ends_with(&p("toplevel/second/third")));
        assert!(!path.ends_with(&p("/toplevel")));
        assert!(!path.ends_with(&p("/third")));
        assert!(!path.ends_with(&p("/toplevel/second/third/fourth")));
    }

    #[test]
    fn test_components() {
        let path = p("toplevel/second/third/fourth");
        let names: Vec<String> = path.components().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "/toplevel",
                "/toplevel/second",
                "/toplevel/second/third",
                "/toplevel/second/third/fourth"
            ]
        );
        assert!(ArchivePath::root().components().is_empty());
    }

    #[test]
    fn test_into_iterator_is_restartable() {
        let path = p("/a/b/c");
        let first: Vec<_> = (&path).into_iter().collect();
        let second: Vec<_> = (&path).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![p("/a"), p("/a/b"), p("/a/b/c")]);
    }

    #[test]
    fn test_child() {
        let root = ArchivePath::root();
        let docs = root.child("docs").unwrap();
        assert_eq!(docs.as_str(), "/docs");
        assert_eq!(docs.child("a.txt").unwrap().as_str(), "/docs/a.txt");
        assert!(matches!(docs.child(""), Err(PathError::InvalidArgument(_))));
        assert!(matches!(docs.child("x/y"), Err(PathError::InvalidArgument(_))));
    }

    #[test]
    fn test_is_valid_segment() {
        assert!(is_valid_segment("todo.txt"));
        assert!(is_valid_segment(".."));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment("has/slash"));
        assert!(!is_valid_segment("has\0null"));
    }

    #[test]
    fn test_to_uri_string() {
        let path = p("/toplevel/second");
        assert_eq!(
            path.to_uri_string("archive://id/"),
            "archive://id/toplevel/second"
        );
        assert_eq!(
            path.to_uri_string("archive://id"),
            "archive://id/toplevel/second"
        );
        assert_eq!(ArchivePath::root().to_uri_string("archive://id/"), "archive://id/");
    }

    #[test]
    fn test_composition_decisions() {
        let base = p("/a/b");
        let other = p("/x/y");
        assert_eq!(base.normalize(), base);
        assert_eq!(base.resolve(&other), other);
        assert_eq!(base.resolve_sibling(&other), other);
        assert!(matches!(base.relativize(&other), Err(PathError::Unsupported(_))));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut paths = vec![p("/b"), p("/a/z"), p("/a")];
        paths.sort();
        assert_eq!(paths, vec![p("/a"), p("/a/z"), p("/b")]);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let path = p("docs//notes/");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/docs/notes\"");

        let back: ArchivePath = serde_json::from_str("\"docs/notes\"").unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_borrow_as_canonical_string() {
        use std::collections::BTreeMap;
        use std::ops::Bound;

        let mut map = BTreeMap::new();
        map.insert(p("docs/notes"), 1);
        map.insert(p("/docs"), 2);

        assert_eq!(map.get("/docs/notes"), Some(&1));
        assert_eq!(map.get("docs/notes"), None);
        let keys: Vec<&str> = map
            .range::<str, _>((Bound::Included("/docs/"), Bound::Unbounded))
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["/docs/notes"]);
    }
}
