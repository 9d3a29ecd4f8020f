//! Chunk-and-embed engine
//!
//! A payload is framed as `[0x00, len & 0xFF] ++ payload`, zero-padded to a
//! multiple of 32 bytes and split into blocks. Each block becomes the "witness
//! program" of a P2WSH-shaped output script (`OP_0 OP_PUSHBYTES_32 <block>`).
//!
//! The length header deliberately keeps only the low byte of the length. Payloads
//! of 256 bytes or more still use it; the decoder recovers the full length from
//! the number of carried blocks (see `decoder::extraction`).

use crate::errors::CapacityError;
use bitcoin::hashes::Hash;
use bitcoin::{Amount, ScriptBuf, TxOut, WScriptHash};

/// Size of the length header
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Payload bytes carried per output
pub const CHUNK_SIZE: usize = 32;

/// `OP_0 OP_PUSHBYTES_32` script template header
pub const SCRIPT_TEMPLATE: [u8; 2] = [0x00, 0x20];

/// Prefix a payload with the 2-byte length header
pub fn frame_payload(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    framed.push(0x00);
    framed.push((payload.len() & 0xFF) as u8);
    framed.extend_from_slice(payload);
    framed
}

/// Number of outputs needed to carry a payload of `payload_len` bytes
pub fn chunk_count(payload_len: usize) -> usize {
    (payload_len + LENGTH_PREFIX_LEN).div_ceil(CHUNK_SIZE)
}

/// Split framed bytes into zero-padded 32-byte blocks
pub fn chunk_framed(framed: &[u8]) -> Vec<[u8; CHUNK_SIZE]> {
    framed
        .chunks(CHUNK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; CHUNK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            block
        })
        .collect()
}

/// Build the pseudo-P2WSH script carrying one block
pub fn embedding_script(block: [u8; CHUNK_SIZE]) -> ScriptBuf {
    ScriptBuf::new_p2wsh(&WScriptHash::from_byte_array(block))
}

/// Frame, chunk and embed a payload as dust-valued outputs
///
/// Fails with `CapacityError::TooManyOutputs` when the payload needs more than
/// `max_outputs` outputs; raising the ceiling resolves it.
pub fn embed_payload(
    payload: &[u8],
    dust_value: u64,
    max_outputs: usize,
) -> Result<Vec<TxOut>, CapacityError> {
    let required = chunk_count(payload.len());
    if required > max_outputs {
        return Err(CapacityError::TooManyOutputs {
            required,
            limit: max_outputs,
        });
    }

    let framed = frame_payload(payload);
    let value = Amount::from_sat(dust_value);
    Ok(chunk_framed(&framed)
        .into_iter()
        .map(|block| TxOut {
            value,
            script_pubkey: embedding_script(block),
        })
        .collect())
}
