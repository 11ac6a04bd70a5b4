//! Core domain types
//!
//! These types are what the rest of the application sees. They never carry
//! backend-version specific field names; the reconciler maps raw payloads
//! onto them.

pub mod error;
pub mod job;
pub mod result;
