//! Bitcoin Stamps signature variants
//!
//! The encoder always writes the canonical lower-case `stamp:` tag. Payloads in the
//! wild also carry `STAMP:` and the plural `stamps:`, so the decoder recognises
//! all four spellings at the start of a reassembled payload.

use serde::{Deserialize, Serialize};

/// Bitcoin Stamps signature variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StampSignature {
    /// "stamp:" - lowercase singular (canonical, written by the encoder)
    StampLower,
    /// "STAMP:" - uppercase singular
    StampUpper,
    /// "stamps:" - lowercase plural
    StampsLower,
    /// "STAMPS:" - uppercase plural
    StampsUpper,
}

impl StampSignature {
    /// Signature written on encode
    pub const CANONICAL: StampSignature = StampSignature::StampLower;

    /// Get the byte string for this signature variant
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::StampLower => b"stamp:",
            Self::StampUpper => b"STAMP:",
            Self::StampsLower => b"stamps:",
            Self::StampsUpper => b"STAMPS:",
        }
    }

    /// Get the length of this signature in bytes
    pub const fn len(&self) -> usize {
        match self {
            Self::StampLower | Self::StampUpper => 6,
            Self::StampsLower | Self::StampsUpper => 7,
        }
    }

    /// Always false; present for clippy's `len_without_is_empty`
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Every accepted signature, plural first
    pub const ALL: [StampSignature; 4] = [
        Self::StampsLower,
        Self::StampsUpper,
        Self::StampLower,
        Self::StampUpper,
    ];

    /// Match a signature at the very start of `data`, returning it and the rest
    pub fn strip_from(data: &[u8]) -> Option<(StampSignature, &[u8])> {
        Self::ALL.into_iter().find_map(|sig| {
            data.strip_prefix(sig.as_bytes())
                .map(|rest| (sig, rest))
        })
    }
}

impl std::fmt::Display for StampSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // All variants are ASCII literals
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl std::str::FromStr for StampSignature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stamp:" => Ok(Self::StampLower),
            "STAMP:" => Ok(Self::StampUpper),
            "stamps:" => Ok(Self::StampsLower),
            "STAMPS:" => Ok(Self::StampsUpper),
            _ => Err(format!("Unknown stamp signature: {}", s)),
        }
    }
}
