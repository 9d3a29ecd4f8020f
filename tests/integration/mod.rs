//! Integration Tests Module
//!
//! End-to-end tests that run complete encode and decode pipelines across
//! multiple components.

pub mod concurrency;
pub mod decode_safety;
pub mod output_ordering;
