//! Presence data is organized as follows:
//!  - [loader] reads a delimited file into an immutable [entities::Dataset] in a single pass.
//!  - [cache] keeps the last loaded dataset for a fixed ttl, reloads are serialized.

pub mod cache;
pub mod entities;
#[cfg(test)]
pub mod fixtures;
pub mod loader;
