//! Counterparty asset name <-> asset ID codec
//!
//! Source: counterparty-core/counterpartycore/lib/ledger (get_asset_id / get_asset_name)
//!
//! - `BTC` and `XCP` are reserved IDs 0 and 1
//! - Alphabetic names (4-12 letters, not starting with `A`) are base-26 numbers
//!   with `A` = 0 .. `Z` = 25
//! - Numeric names are `A` followed by a decimal ID in `(26^12, 2^64 - 1]`

use thiserror::Error;

const B26_DIGITS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Smallest alphabetic asset ID (`BAAA`)
pub const MIN_NAMED_ASSET_ID: u64 = 26u64.pow(3);

/// Alphabetic IDs are strictly below this; numeric IDs strictly above
pub const NUMERIC_ASSET_BOUNDARY: u64 = 26u64.pow(12);

/// Smallest numeric asset ID
pub const MIN_NUMERIC_ASSET_ID: u64 = NUMERIC_ASSET_BOUNDARY + 1;

pub const BTC_ASSET_ID: u64 = 0;
pub const XCP_ASSET_ID: u64 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetIdError {
    #[error("Asset name is empty")]
    Empty,

    #[error("Asset name '{0}' contains characters outside A-Z")]
    InvalidCharacter(String),

    #[error("Asset name '{name}' must be 4-12 characters, got {len}")]
    InvalidLength { name: String, len: usize },

    #[error("Alphabetic asset name '{0}' must not start with 'A'")]
    StartsWithA(String),

    #[error("Numeric asset '{0}' is not a valid decimal ID")]
    InvalidNumeric(String),

    #[error("Numeric asset ID {0} is outside (26^12, 2^64 - 1]")]
    NumericOutOfRange(String),
}

/// Convert a human-readable asset name into its 8-byte numeric ID
pub fn asset_name_to_id(name: &str) -> Result<u64, AssetIdError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AssetIdError::Empty);
    }

    match name {
        "BTC" => return Ok(BTC_ASSET_ID),
        "XCP" => return Ok(XCP_ASSET_ID),
        _ => {}
    }

    if let Some(digits) = name.strip_prefix('A') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return numeric_asset_id(digits);
        }
    }

    if !name.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(AssetIdError::InvalidCharacter(name.to_string()));
    }
    if name.starts_with('A') {
        return Err(AssetIdError::StartsWithA(name.to_string()));
    }
    if !(4..=12).contains(&name.len()) {
        return Err(AssetIdError::InvalidLength {
            name: name.to_string(),
            len: name.len(),
        });
    }

    // Fits: 12 base-26 digits < 26^12 < 2^64
    let id = name
        .bytes()
        .fold(0u64, |acc, b| acc * 26 + u64::from(b - b'A'));
    Ok(id)
}

fn numeric_asset_id(digits: &str) -> Result<u64, AssetIdError> {
    if digits.starts_with('0') {
        return Err(AssetIdError::InvalidNumeric(digits.to_string()));
    }
    let id: u64 = digits.parse().map_err(|e: std::num::ParseIntError| {
        match e.kind() {
            std::num::IntErrorKind::PosOverflow => {
                AssetIdError::NumericOutOfRange(digits.to_string())
            }
            _ => AssetIdError::InvalidNumeric(digits.to_string()),
        }
    })?;
    if id < MIN_NUMERIC_ASSET_ID {
        return Err(AssetIdError::NumericOutOfRange(digits.to_string()));
    }
    Ok(id)
}

/// Convert an asset ID back into its name
///
/// Returns `None` for IDs that no valid name maps to (2 ..= 26^3 - 1, and 26^12).
pub fn asset_id_to_name(asset_id: u64) -> Option<String> {
    match asset_id {
        BTC_ASSET_ID => return Some("BTC".to_string()),
        XCP_ASSET_ID => return Some("XCP".to_string()),
        _ => {}
    }

    if asset_id >= MIN_NUMERIC_ASSET_ID {
        return Some(format!("A{}", asset_id));
    }
    if !(MIN_NAMED_ASSET_ID..NUMERIC_ASSET_BOUNDARY).contains(&asset_id) {
        return None;
    }

    let mut n = asset_id;
    let mut letters = Vec::with_capacity(12);
    while n > 0 {
        letters.push(B26_DIGITS[(n % 26) as usize]);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).ok()
}

/// Derive a numeric asset name (`A<id>`) from caller-supplied entropy
///
/// The codec holds no randomness source; callers pass random bytes and get a
/// deterministic, always-valid numeric name back.
pub fn numeric_asset_name(entropy: u64) -> String {
    let span = u64::MAX - NUMERIC_ASSET_BOUNDARY;
    let id = MIN_NUMERIC_ASSET_ID + entropy % span;
    format!("A{}", id)
}
