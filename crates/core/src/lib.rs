//! YACC registration domain.
//!
//! - [`allocator::Allocator`] assigns slots and routes overflow to the waitlist.
//! - [`form::RegistrationForm`] coerces the loosely typed front-end payload.
//! - [`registration`] defines the persisted records and their row layouts.
//! - [`store::TabularStore`] and [`mailer::Mailer`] are the collaborator seams
//!   implemented by `yacc-db` and `yacc-notify`.

pub mod allocator;
pub mod config;
pub mod error;
pub mod form;
pub mod mailer;
pub mod messages;
pub mod outcome;
pub mod registration;
pub mod store;
pub mod transaction;
pub mod types;

#[cfg(test)]
mod testing;
