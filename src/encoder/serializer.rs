//! Dual-path SRC-20 payload serialiser
//!
//! The verbatim path is the canonical JSON of the normalised record. When
//! compression is enabled and the JSON is longer than `COMPRESSION_THRESHOLD`,
//! the record is also packed as MessagePack and zlib-deflated; the deflated form
//! wins only if it is strictly shorter. Either way the `stamp:` tag is prepended.

use crate::config::EncodingOptions;
use crate::encoder::normalize::normalize_with_notices;
use crate::errors::{CodecError, CodecResult};
use crate::types::src20::{NormalizedRecord, TokenOperation, WireAmount, WireNumber};
use crate::types::stamps::STAMP_TAG;
use crate::types::EncodeNotice;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use rmpv::Value as MsgValue;
use std::io::Write;
use tracing::debug;

/// Verbatim JSON at or below this many bytes is never compressed
pub const COMPRESSION_THRESHOLD: usize = 64;

/// Tagged serialisation handed to the chunk-and-embed engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPayload {
    /// `stamp:` followed by JSON or zlib(MessagePack)
    pub bytes: Vec<u8>,
    pub compressed: bool,
}

impl SerializedPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Canonical JSON text of a normalised record
pub fn to_json(record: &NormalizedRecord) -> CodecResult<String> {
    Ok(serde_json::to_string(record)?)
}

fn number_value(n: WireNumber) -> MsgValue {
    match n {
        WireNumber::Int(i) => MsgValue::from(i),
        WireNumber::Float(f) => MsgValue::from(f),
    }
}

/// MessagePack map with the same keys, in the same order, as the JSON form
pub fn to_msgpack_value(record: &NormalizedRecord) -> MsgValue {
    let mut entries: Vec<(MsgValue, MsgValue)> = vec![
        (MsgValue::from("p"), MsgValue::from(record.p.as_str())),
        (MsgValue::from("op"), MsgValue::from(record.op.as_str())),
        (MsgValue::from("tick"), MsgValue::from(record.tick.as_str())),
    ];

    if let Some(max) = record.max {
        entries.push((MsgValue::from("max"), number_value(max)));
    }
    if let Some(lim) = record.lim {
        entries.push((MsgValue::from("lim"), number_value(lim)));
    }
    if let Some(dec) = record.dec {
        entries.push((MsgValue::from("dec"), MsgValue::from(dec)));
    }
    if let Some(amt) = &record.amt {
        let value = match amt {
            WireAmount::Number(n) => number_value(*n),
            WireAmount::Text(t) => MsgValue::from(t.as_str()),
        };
        entries.push((MsgValue::from("amt"), value));
    }
    for (key, value) in record.metadata_fields() {
        if let Some(v) = value {
            entries.push((MsgValue::from(key), MsgValue::from(v.as_str())));
        }
    }

    MsgValue::Map(entries)
}

/// Pack a record as MessagePack bytes
pub fn pack(record: &NormalizedRecord) -> CodecResult<Vec<u8>> {
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, &to_msgpack_value(record))
        .map_err(|e| CodecError::Serialization(format!("MessagePack error: {}", e)))?;
    Ok(buf)
}

/// zlib-deflate at the default level (deterministic for identical input)
pub fn deflate(data: &[u8]) -> CodecResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn tagged(body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(STAMP_TAG.len() + body.len());
    bytes.extend_from_slice(STAMP_TAG);
    bytes.extend_from_slice(body);
    bytes
}

/// Serialise an already-normalised record, choosing between verbatim and compressed
pub fn serialize_record(
    record: &NormalizedRecord,
    compression: bool,
    notices: &mut Vec<EncodeNotice>,
) -> CodecResult<SerializedPayload> {
    let json = to_json(record)?;
    let verbatim_len = json.len();

    if !compression || verbatim_len <= COMPRESSION_THRESHOLD {
        if compression {
            notices.push(EncodeNotice::CompressionSkipped {
                verbatim_len,
                compressed_len: None,
            });
        }
        return Ok(SerializedPayload {
            bytes: tagged(json.as_bytes()),
            compressed: false,
        });
    }

    let compressed = deflate(&pack(record)?)?;
    if compressed.len() < verbatim_len {
        debug!(
            verbatim_len,
            compressed_len = compressed.len(),
            "using packed + deflated SRC-20 payload"
        );
        notices.push(EncodeNotice::CompressionApplied {
            verbatim_len,
            compressed_len: compressed.len(),
        });
        Ok(SerializedPayload {
            bytes: tagged(&compressed),
            compressed: true,
        })
    } else {
        debug!(
            verbatim_len,
            compressed_len = compressed.len(),
            "compression did not help, keeping JSON payload"
        );
        notices.push(EncodeNotice::CompressionSkipped {
            verbatim_len,
            compressed_len: Some(compressed.len()),
        });
        Ok(SerializedPayload {
            bytes: tagged(json.as_bytes()),
            compressed: false,
        })
    }
}

/// Validate, normalise and serialise a token operation
///
/// Validation failures abort before any bytes are produced.
pub fn serialize_operation(
    op: &TokenOperation,
    options: &EncodingOptions,
) -> CodecResult<(SerializedPayload, Vec<EncodeNotice>)> {
    let (record, mut notices) = normalize_with_notices(op)?;
    let payload = serialize_record(&record, options.compression, &mut notices)?;
    Ok((payload, notices))
}
