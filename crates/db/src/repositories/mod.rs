//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept a pool or an open transaction as the first argument.

pub mod collection_repo;

pub use collection_repo::CollectionRepo;
