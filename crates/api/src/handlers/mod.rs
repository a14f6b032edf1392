//! Request handlers.
//!
//! Handlers coerce inbound payloads, delegate to the
//! [`Allocator`](yacc_core::allocator::Allocator), and wrap results in
//! [`DataResponse`](crate::response::DataResponse).

pub mod admin;
pub mod registration;
