//! Counterparty issuance message encoder
//!
//! Plaintext layout:
//! `CNTRPRTY ++ [22][asset_id: u64 BE][quantity: u64 BE][flags: u8] ++ description`
//!
//! The whole plaintext, prefix included, is ARC4-obfuscated with the funding
//! input's transaction ID and pushed into a single OP_RETURN output.

use crate::asset_id::{asset_name_to_id, AssetIdError};
use crate::crypto::arc4;
use crate::errors::{CapacityError, CodecError, CodecResult};
use crate::types::counterparty::{
    IssuanceMessage, COUNTERPARTY_PREFIX, ISSUANCE_HEADER_LEN, ISSUANCE_MESSAGE_TYPE,
    MAX_OP_RETURN_DATA,
};
use bitcoin::script::PushBytesBuf;
use bitcoin::{Amount, ScriptBuf, TxOut};

/// Obfuscated issuance ready for the transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscatedIssuance {
    /// ARC4 ciphertext of the prefixed message
    pub data: Vec<u8>,
    /// `OP_RETURN <data>`
    pub script: ScriptBuf,
}

impl ObfuscatedIssuance {
    /// Zero-value output; must be the first output of the transaction
    pub fn to_output(&self) -> TxOut {
        TxOut {
            value: Amount::ZERO,
            script_pubkey: self.script.clone(),
        }
    }
}

/// Build a message for a named asset
pub fn issuance_for_asset(
    asset: &str,
    quantity: u64,
    flags: crate::types::IssuanceFlags,
    description: Option<&str>,
) -> Result<IssuanceMessage, AssetIdError> {
    Ok(IssuanceMessage {
        asset_id: asset_name_to_id(asset)?,
        quantity,
        flags,
        description: description.map(str::to_string),
    })
}

/// The 18-byte header plus description, without the protocol prefix
pub fn build_message_body(message: &IssuanceMessage) -> Vec<u8> {
    let mut body = Vec::with_capacity(ISSUANCE_HEADER_LEN + message.description_len());
    body.push(ISSUANCE_MESSAGE_TYPE);
    body.extend_from_slice(&message.asset_id.to_be_bytes());
    body.extend_from_slice(&message.quantity.to_be_bytes());
    body.push(message.flags.to_byte());
    if let Some(description) = &message.description {
        body.extend_from_slice(description.as_bytes());
    }
    body
}

/// Prefixed plaintext, exactly what gets encrypted
pub fn build_plaintext(message: &IssuanceMessage) -> Vec<u8> {
    let body = build_message_body(message);
    let mut plaintext = Vec::with_capacity(COUNTERPARTY_PREFIX.len() + body.len());
    plaintext.extend_from_slice(COUNTERPARTY_PREFIX);
    plaintext.extend_from_slice(&body);
    plaintext
}

/// Longest description that still fits in the OP_RETURN ceiling
pub const fn max_description_len() -> usize {
    MAX_OP_RETURN_DATA - COUNTERPARTY_PREFIX.len() - ISSUANCE_HEADER_LEN
}

/// Encrypt an issuance message and wrap it in an OP_RETURN script
///
/// `key_txid_hex` is conventionally the funding input's transaction ID.
pub fn encode_issuance(
    message: &IssuanceMessage,
    key_txid_hex: &str,
) -> CodecResult<ObfuscatedIssuance> {
    let key = arc4::prepare_key_from_txid(key_txid_hex)
        .ok_or_else(|| CodecError::InvalidKey(format!("'{}' is not hex", key_txid_hex)))?;

    let plaintext = build_plaintext(message);
    if plaintext.len() > MAX_OP_RETURN_DATA {
        return Err(CapacityError::DescriptionTooLong {
            size: plaintext.len(),
            limit: MAX_OP_RETURN_DATA,
        }
        .into());
    }

    let data = arc4::apply(&key, &plaintext)
        .ok_or_else(|| CodecError::InvalidKey("empty key".to_string()))?;

    let push = PushBytesBuf::try_from(data.clone())
        .map_err(|e| CodecError::Serialization(format!("OP_RETURN push: {}", e)))?;
    let script = ScriptBuf::new_op_return(push);

    Ok(ObfuscatedIssuance { data, script })
}
