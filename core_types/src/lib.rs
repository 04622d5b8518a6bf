//! # Core Types
//!
//! This crate defines the fundamental types shared by the archive namespace
//! crates.
//!
//! ## Key Types
//!
//! - [`NamespaceId`]: Identity token of one in-memory archive namespace
//! - [`NamespaceBound`]: Capability implemented by everything that belongs to
//!   a namespace (paths, files)

pub mod binding;
pub mod ids;

pub use binding::NamespaceBound;
pub use ids::NamespaceId;
