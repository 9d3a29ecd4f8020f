//! Payload extraction from embedding outputs
//!
//! Collects the 32-byte data fields of every `OP_0 OP_PUSHBYTES_32` output in
//! order, strips the zero padding and re-reads the 2-byte length header.

use crate::encoder::embed::{CHUNK_SIZE, LENGTH_PREFIX_LEN, SCRIPT_TEMPLATE};
use crate::types::stamps::StampSignature;
use base64::alphabet;
use base64::engine::{self, general_purpose::GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use bitcoin::{Script, TxOut};
use tracing::debug;

/// Standard alphabet, padding optional
pub const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(engine::DecodePaddingMode::Indifferent),
);

/// Full length of an embedding script
pub const EMBEDDING_SCRIPT_LEN: usize = SCRIPT_TEMPLATE.len() + CHUNK_SIZE;

/// True for scripts shaped like `OP_0 OP_PUSHBYTES_32 <32 bytes>`
pub fn is_embedding_script(script: &Script) -> bool {
    let bytes = script.as_bytes();
    bytes.len() == EMBEDDING_SCRIPT_LEN && bytes[..2] == SCRIPT_TEMPLATE
}

/// Concatenated data fields of every embedding output, in output order
pub fn collect_embedded_bytes(outputs: &[TxOut]) -> Vec<u8> {
    outputs
        .iter()
        .map(|o| o.script_pubkey.as_script())
        .filter(|s| is_embedding_script(s))
        .flat_map(|s| s.as_bytes()[SCRIPT_TEMPLATE.len()..].iter().copied())
        .collect()
}

/// Recover the payload length from the mod-256 header byte
///
/// Returns the smallest length that is at least `stripped_len`, congruent to
/// `header` mod 256 and no larger than `available`. For single-block payloads this
/// is the header itself. Falls back to `stripped_len` when no candidate fits.
pub fn recover_payload_len(header: u8, stripped_len: usize, available: usize) -> usize {
    let gap = (header as usize + 256 - stripped_len % 256) % 256;
    let candidate = stripped_len + gap;
    if candidate <= available {
        candidate
    } else {
        debug!(
            header,
            stripped_len, available, "length header inconsistent with carried bytes"
        );
        stripped_len
    }
}

/// Reassemble the framed payload carried by `outputs`
///
/// `None` when there are no embedding outputs, the first header byte is not
/// zero, or nothing but padding follows the header.
pub fn extract_embedded_payload(outputs: &[TxOut]) -> Option<Vec<u8>> {
    let data = collect_embedded_bytes(outputs);
    if data.len() < LENGTH_PREFIX_LEN || data[0] != 0x00 {
        return None;
    }

    let body = &data[LENGTH_PREFIX_LEN..];
    let stripped_len = body.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
    if stripped_len == 0 {
        return None;
    }

    let len = recover_payload_len(data[1], stripped_len, body.len());
    Some(body[..len].to_vec())
}

/// Strip a `data:<mime>;base64,` prefix from a textual stamp body
///
/// Binary (non UTF-8) data and text without data URI markers pass through.
pub(crate) fn strip_data_uri_prefix(data: &[u8]) -> &[u8] {
    let Ok(text) = std::str::from_utf8(data) else {
        return data;
    };
    if !text.starts_with("data:") && !text.contains(";base64") {
        return data;
    }

    match text.rfind(',').or_else(|| text.rfind(';')) {
        Some(pos) => text[pos + 1..].trim().as_bytes(),
        None => data,
    }
}

/// Decode a `stamp:<base64>` text (optionally data-URI prefixed) into file bytes
pub fn decode_stamp_text(text: &[u8]) -> Option<Vec<u8>> {
    let (_, rest) = StampSignature::strip_from(text)?;
    let encoded = strip_data_uri_prefix(rest);
    let encoded: Vec<u8> = encoded
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if encoded.is_empty() {
        return None;
    }
    BASE64_LENIENT.decode(&encoded).ok()
}
