use serde::{Deserialize, Serialize};

// Core protocol constants (Source: counterpartycore/lib/config.py)
pub const COUNTERPARTY_PREFIX: &[u8] = b"CNTRPRTY"; // 8-byte protocol identifier

/// Message type byte for every issuance variant this codec writes
pub const ISSUANCE_MESSAGE_TYPE: u8 = 22;

/// type (1) + asset id (8) + quantity (8) + flags (1)
pub const ISSUANCE_HEADER_LEN: usize = 18;

/// Largest obfuscated message accepted into an OP_RETURN data push
pub const MAX_OP_RETURN_DATA: usize = 80;

/// Combined issuance flag byte: `divisible | locked << 1 | reset << 2`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceFlags {
    pub divisible: bool,
    pub locked: bool,
    pub reset: bool,
}

impl IssuanceFlags {
    const DIVISIBLE: u8 = 0b001;
    const LOCKED: u8 = 0b010;
    const RESET: u8 = 0b100;

    pub fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.divisible {
            byte |= Self::DIVISIBLE;
        }
        if self.locked {
            byte |= Self::LOCKED;
        }
        if self.reset {
            byte |= Self::RESET;
        }
        byte
    }

    /// Unknown high bits are ignored
    pub fn from_byte(byte: u8) -> Self {
        Self {
            divisible: byte & Self::DIVISIBLE != 0,
            locked: byte & Self::LOCKED != 0,
            reset: byte & Self::RESET != 0,
        }
    }
}

/// Asset issuance message (message type 22)
///
/// Layout after the 8-byte `CNTRPRTY` prefix:
/// `[type: 1][asset_id: 8 BE][quantity: 8 BE][flags: 1][description: rest, UTF-8]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceMessage {
    pub asset_id: u64,
    pub quantity: u64,
    pub flags: IssuanceFlags,
    pub description: Option<String>,
}

impl IssuanceMessage {
    /// Typical stamp issuance: one locked, indivisible unit
    pub fn stamp(asset_id: u64, description: &str) -> Self {
        Self {
            asset_id,
            quantity: 1,
            flags: IssuanceFlags {
                divisible: false,
                locked: true,
                reset: false,
            },
            description: Some(description.to_string()),
        }
    }

    pub fn description_len(&self) -> usize {
        self.description.as_ref().map_or(0, |d| d.len())
    }
}
