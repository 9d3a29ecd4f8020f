//! SRC-20 and stamp encoders
//!
//! `encode_src20` runs the full pipeline for a token operation:
//! validate → normalise → serialise (JSON or zlib(MessagePack)) → tag →
//! frame → chunk into pseudo-P2WSH outputs → order behind the carrier output.
//!
//! `encode_stamp_issuance` builds the Counterparty-wrapped variant: an
//! ARC4-obfuscated issuance in an OP_RETURN, followed by the embedded file.

use crate::config::EncodingOptions;
use crate::errors::CodecResult;
use crate::types::{EncodeNotice, EncodedPayload, EncodedStamp, IssuanceMessage, TokenOperation};
use tracing::{debug, warn};

pub mod assembler;
pub mod embed;
pub mod issuance;
pub mod normalize;
pub mod serializer;
pub mod validation;

pub use assembler::{address_script, assemble_outputs, carrier_role, CarrierRole};
pub use embed::embed_payload;
pub use issuance::encode_issuance;
pub use normalize::normalize;
pub use serializer::{serialize_operation, SerializedPayload};
pub use validation::{parse_operation_json, parse_raw_operation, validate_operation};

/// Largest payload the 1-byte length header expresses exactly
pub const MAX_EXACT_HEADER_LEN: usize = 0xFF;

fn check_length_header(payload_len: usize, notices: &mut Vec<EncodeNotice>) {
    if payload_len > MAX_EXACT_HEADER_LEN {
        warn!(
            payload_len,
            header = payload_len & 0xFF,
            "payload longer than the length header can express"
        );
        notices.push(EncodeNotice::TruncatedLengthHeader { payload_len });
    }
}

/// Encode a token operation into ordered transaction outputs
///
/// Validation problems are all reported together and nothing is produced.
pub fn encode_src20(op: &TokenOperation, options: &EncodingOptions) -> CodecResult<EncodedPayload> {
    let (payload, mut notices) = serialize_operation(op, options)?;
    check_length_header(payload.len(), &mut notices);

    let embedded = embed_payload(&payload.bytes, options.dust_value, options.max_outputs)?;
    let chunk_count = embedded.len();
    let outputs = assemble_outputs(op.kind(), embedded, options, &mut notices)?;

    debug!(
        operation = %op.kind(),
        tick = %op.tick,
        payload_len = payload.len(),
        compressed = payload.compressed,
        chunk_count,
        outputs = outputs.len(),
        "encoded SRC-20 operation"
    );

    Ok(EncodedPayload {
        outputs,
        compressed: payload.compressed,
        payload_len: payload.len(),
        chunk_count,
        notices,
    })
}

/// Encode a stamp issuance carrying `file_data`
///
/// Output order: OP_RETURN issuance (value 0), sender carrier when
/// `options.from_address` is set, then the framed file in embedding outputs.
/// An empty file yields no embedding outputs.
pub fn encode_stamp_issuance(
    message: &IssuanceMessage,
    file_data: &[u8],
    key_txid_hex: &str,
    options: &EncodingOptions,
) -> CodecResult<EncodedStamp> {
    let issuance = encode_issuance(message, key_txid_hex)?;

    let mut notices = Vec::new();
    let embedded = if file_data.is_empty() {
        Vec::new()
    } else {
        check_length_header(file_data.len(), &mut notices);
        embed_payload(file_data, options.dust_value, options.max_outputs)?
    };
    let chunk_count = embedded.len();

    let outputs =
        assembler::assemble_stamp_outputs(issuance.to_output(), embedded, options, &mut notices)?;

    debug!(
        asset_id = message.asset_id,
        file_len = file_data.len(),
        chunk_count,
        "encoded stamp issuance"
    );

    Ok(EncodedStamp {
        outputs,
        obfuscated_message: issuance.data,
        chunk_count,
        notices,
    })
}
