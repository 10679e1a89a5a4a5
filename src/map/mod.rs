//! # Map Module
//!
//! Loading of hand-authored cave maps.
//!
//! Maps are supplied fully formed as JSON documents and flattened once at
//! startup into a [`crate::LocationGraph`].

pub mod loader;

pub use loader::*;
