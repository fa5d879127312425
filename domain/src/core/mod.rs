//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - protocol contract and value-object errors
//! - [`ack::Ack`] - opaque acknowledgement returned by durable writes
//! - [`string`] - log-safe string helpers

pub mod ack;
pub mod error;
pub mod string;
