//! Delivery channels implementing [`yacc_core::mailer::Mailer`].

pub mod email;
pub mod log;
