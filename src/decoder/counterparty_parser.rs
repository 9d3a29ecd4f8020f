//! Counterparty issuance message parser
//!
//! Reverses the issuance encoder: pulls the data push out of an OP_RETURN
//! script, re-derives the ARC4 keystream from the funding txid, checks the
//! `CNTRPRTY` prefix and parses the fixed-layout issuance body.

use crate::crypto::arc4;
use crate::decoder::extraction::decode_stamp_text;
use crate::errors::IssuanceError;
use crate::types::counterparty::{
    IssuanceFlags, IssuanceMessage, COUNTERPARTY_PREFIX, ISSUANCE_HEADER_LEN,
    ISSUANCE_MESSAGE_TYPE,
};
use bitcoin::opcodes::all::OP_RETURN;
use bitcoin::script::Instruction;
use bitcoin::Script;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;
use tracing::debug;

/// Data pushed by an `OP_RETURN <data>` script
pub fn op_return_data(script: &Script) -> Result<Vec<u8>, IssuanceError> {
    if !script.is_op_return() {
        return Err(IssuanceError::NotOpReturn);
    }

    let mut instructions = script.instructions();
    match instructions.next() {
        Some(Ok(Instruction::Op(op))) if op == OP_RETURN => {}
        _ => return Err(IssuanceError::NotOpReturn),
    }
    match (instructions.next(), instructions.next()) {
        (Some(Ok(Instruction::PushBytes(push))), None) => Ok(push.as_bytes().to_vec()),
        _ => Err(IssuanceError::NotOpReturn),
    }
}

/// Decrypt obfuscated data and strip the verified `CNTRPRTY` prefix
pub fn decrypt_message(data: &[u8], key_txid_hex: &str) -> Result<Vec<u8>, IssuanceError> {
    let key = arc4::prepare_key_from_txid(key_txid_hex).ok_or(IssuanceError::InvalidKey)?;
    let plaintext = arc4::apply(&key, data).ok_or(IssuanceError::InvalidKey)?;

    match plaintext.strip_prefix(COUNTERPARTY_PREFIX) {
        Some(body) => Ok(body.to_vec()),
        None => {
            debug!(
                data_len = data.len(),
                "decrypted data does not carry the Counterparty prefix"
            );
            Err(IssuanceError::PrefixMismatch)
        }
    }
}

/// Parse an issuance body (everything after the prefix)
///
/// Format: `[type: u8][asset_id: u64 BE][quantity: u64 BE][flags: u8][description]`
pub fn parse_issuance(body: &[u8]) -> Result<IssuanceMessage, IssuanceError> {
    if body.len() < ISSUANCE_HEADER_LEN {
        return Err(IssuanceError::InsufficientLength {
            expected: ISSUANCE_HEADER_LEN,
            actual: body.len(),
        });
    }

    let mut cursor = Cursor::new(body);
    let short = |_| IssuanceError::InsufficientLength {
        expected: ISSUANCE_HEADER_LEN,
        actual: body.len(),
    };

    let message_type = cursor.read_u8().map_err(short)?;
    if message_type != ISSUANCE_MESSAGE_TYPE {
        return Err(IssuanceError::UnsupportedMessageType(message_type));
    }
    let asset_id = cursor.read_u64::<BigEndian>().map_err(short)?;
    let quantity = cursor.read_u64::<BigEndian>().map_err(short)?;
    let flags = IssuanceFlags::from_byte(cursor.read_u8().map_err(short)?);

    let rest = &body[ISSUANCE_HEADER_LEN..];
    let description = if rest.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(rest).into_owned())
    };

    Ok(IssuanceMessage {
        asset_id,
        quantity,
        flags,
        description,
    })
}

/// Decode the issuance carried by an OP_RETURN script
pub fn decode_issuance(script: &Script, key_txid_hex: &str) -> Result<IssuanceMessage, IssuanceError> {
    let data = op_return_data(script)?;
    let body = decrypt_message(&data, key_txid_hex)?;
    parse_issuance(&body)
}

/// File bytes of a `stamp:<base64>` issuance description, if it is one
pub fn description_stamp(message: &IssuanceMessage) -> Option<Vec<u8>> {
    decode_stamp_text(message.description.as_deref()?.as_bytes())
}
