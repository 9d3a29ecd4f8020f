//! Bitcoin Stamps protocol constants and type definitions
//!
//! Stamps payloads are tagged with a textual `stamp:` signature before being
//! framed and split across P2WSH-shaped data outputs.

pub mod signature;

pub use signature::StampSignature;

/// Tag prepended to every SRC-20 payload before framing
pub const STAMP_TAG: &[u8] = StampSignature::CANONICAL.as_bytes();
