//! Row structs for the collection tables.

pub mod collection;
