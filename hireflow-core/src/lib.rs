//! Hireflow Core
//!
//! Core types and pure logic for the hireflow job orchestration client.
//!
//! This crate contains:
//! - Domain types: Jobs, job kinds, canonical results and classified errors
//! - DTOs: The response envelope and job submissions
//! - Reconciliation: Mapping heterogeneous backend payloads onto canonical results
//! - Timeout policy: Per-operation request timeouts

pub mod domain;
pub mod dto;
pub mod reconcile;
pub mod timeout;
