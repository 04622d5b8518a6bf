//! # Filesystem View
//!
//! This crate provides the path algebra of an in-memory archive namespace
//! and the contract a namespace must fulfil to be navigated.
//!
//! ## Design
//!
//! - Every path is absolute; there is no working directory
//! - A path is a value: parsing, slicing and comparing never consult a namespace
//! - Existence, content and child enumeration come from a [`NamespaceView`]
//! - An entry is a directory or a file owning one in-memory channel

pub mod directory;
pub mod namespace;
pub mod path;

pub use directory::{EntryKind, Node};
pub use namespace::NamespaceView;
pub use path::{is_valid_segment, ArchivePath, PathError, ROOT, SEPARATOR};
