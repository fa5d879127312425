//! Preference domain module
//!
//! Durable user choices live on the backend. The client builds the values
//! below, submits them once and keeps nothing.
//!
//! - [`ClarificationChoice`] - answer to one clarify round, optionally
//!   remembered as the default for its phrase
//! - [`DefaultBinding`] - standing `kind → target` default

pub mod entities;

pub use entities::{ClarificationChoice, DefaultBinding};
