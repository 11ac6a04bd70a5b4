//! Data transfer objects
//!
//! Wire-level shapes exchanged with the remote service.

pub mod envelope;
pub mod submission;
