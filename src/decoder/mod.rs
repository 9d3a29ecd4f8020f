//! SRC-20 and stamp decoders
//!
//! Decoding is speculative: callers routinely probe transactions that carry some
//! other protocol, so "not this protocol" is `None` rather than an error. The
//! pipeline is:
//!
//! 1. Reassemble the framed payload from the embedding outputs
//! 2. Require a stamp signature at offset 0
//! 3. Try zlib-inflate; on success read MessagePack, then JSON, from the inflated bytes
//! 4. If inflating fails, read JSON, then MessagePack, from the raw bytes
//! 5. Denormalise into the caller-facing shape

use crate::encoder::normalize::best_effort_number;
use crate::encoder::validation::{is_src20_protocol, parse_decimal};
use crate::types::src20::{
    NormalizedRecord, RawOperation, TokenOperation, WireAmount, WireNumber, SRC20_PROTOCOL,
};
use crate::types::stamps::StampSignature;
use crate::types::SRC20Operation;
use bitcoin::TxOut;
use flate2::read::ZlibDecoder;
use rmpv::Value as MsgValue;
use serde_json::{Map, Number, Value};
use std::io::Read;
use tracing::debug;

pub mod counterparty_parser;
pub mod extraction;

pub use counterparty_parser::{decode_issuance, description_stamp};
pub use extraction::extract_embedded_payload;

/// Upper bound on inflated payload size
pub const MAX_INFLATED_LEN: u64 = 1 << 20;

/// A decoded SRC-20 record and how it was carried
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSrc20 {
    pub record: NormalizedRecord,
    /// Whether the payload was packed + deflated
    pub compressed: bool,
    pub signature: StampSignature,
}

/// Decode an SRC-20 operation from transaction outputs
///
/// Returns the caller-facing shape: protocol tag `SRC-20`, numbers as decimal
/// strings, multiple transfer amounts split apart.
pub fn decode_src20(outputs: &[TxOut]) -> Option<TokenOperation> {
    decode_src20_record(outputs)?.record.to_operation()
}

/// Decode the normalised wire record from transaction outputs
pub fn decode_src20_record(outputs: &[TxOut]) -> Option<DecodedSrc20> {
    let payload = extract_embedded_payload(outputs)?;
    decode_src20_payload(&payload)
}

/// Decode a reassembled (unframed) payload
pub fn decode_src20_payload(payload: &[u8]) -> Option<DecodedSrc20> {
    let Some((signature, body)) = StampSignature::strip_from(payload) else {
        debug!(payload_len = payload.len(), "no stamp signature at offset 0");
        return None;
    };

    let (value, compressed) = match inflate(body) {
        Some(inflated) => {
            let value = read_msgpack(&inflated).or_else(|| read_json(&inflated))?;
            (value, true)
        }
        None => {
            let value = read_json(body).or_else(|| read_msgpack(body))?;
            (value, false)
        }
    };

    let record = record_from_json(value)?;
    Some(DecodedSrc20 {
        record,
        compressed,
        signature,
    })
}

/// Raw stamp file bytes carried by the embedding outputs of a stamp issuance
pub fn decode_stamp_file(outputs: &[TxOut]) -> Option<Vec<u8>> {
    extract_embedded_payload(outputs)
}

fn inflate(data: &[u8]) -> Option<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data).take(MAX_INFLATED_LEN);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated).ok()?;
    if inflated.is_empty() {
        return None;
    }
    Some(inflated)
}

fn read_json(data: &[u8]) -> Option<Value> {
    serde_json::from_slice::<Value>(data)
        .ok()
        .filter(Value::is_object)
}

/// A MessagePack map that spans the whole buffer, converted to JSON
fn read_msgpack(data: &[u8]) -> Option<Value> {
    let mut reader = data;
    let value = rmpv::decode::read_value(&mut reader).ok()?;
    if !reader.is_empty() || !value.is_map() {
        return None;
    }
    msgpack_to_json(&value)
}

/// Convert a MessagePack value to JSON; binary and extension values have no
/// JSON counterpart and reject the whole value
pub fn msgpack_to_json(value: &MsgValue) -> Option<Value> {
    Some(match value {
        MsgValue::Nil => Value::Null,
        MsgValue::Boolean(b) => Value::Bool(*b),
        MsgValue::Integer(i) => match (i.as_u64(), i.as_i64()) {
            (Some(u), _) => Value::Number(u.into()),
            (None, Some(s)) => Value::Number(s.into()),
            (None, None) => return None,
        },
        MsgValue::F32(f) => Value::Number(Number::from_f64(f64::from(*f))?),
        MsgValue::F64(f) => Value::Number(Number::from_f64(*f)?),
        MsgValue::String(s) => Value::String(s.as_str()?.to_string()),
        MsgValue::Array(items) => Value::Array(
            items
                .iter()
                .map(msgpack_to_json)
                .collect::<Option<Vec<_>>>()?,
        ),
        MsgValue::Map(entries) => {
            let mut map = Map::new();
            for (k, v) in entries {
                map.insert(k.as_str()?.to_string(), msgpack_to_json(v)?);
            }
            Value::Object(map)
        }
        MsgValue::Binary(_) | MsgValue::Ext(..) => return None,
    })
}

fn wire_number(value: &Value) -> Option<WireNumber> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => Some(WireNumber::Int(u)),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(WireNumber::Float),
        },
        Value::String(s) => parse_decimal("number", s)
            .ok()
            .map(|d| best_effort_number(&d).0),
        _ => None,
    }
}

fn wire_amount(value: &Value) -> Option<WireAmount> {
    match value {
        Value::String(s) => Some(WireAmount::Text(s.trim().to_string())),
        other => wire_number(other).map(WireAmount::Number),
    }
}

fn wire_decimals(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build the normalised record from decoded JSON
///
/// Keys are matched case-insensitively; the protocol must be SRC-20 and the
/// fields required by the operation must be present.
pub fn record_from_json(value: Value) -> Option<NormalizedRecord> {
    let Value::Object(map) = value else {
        return None;
    };
    let lowered: Map<String, Value> = map
        .into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v))
        .collect();
    let raw: RawOperation = serde_json::from_value(Value::Object(lowered)).ok()?;

    if !is_src20_protocol(raw.p.as_deref()?) {
        return None;
    }
    let kind = SRC20Operation::parse(raw.op.as_deref()?)?;
    let tick = raw.tick.as_deref()?.trim().to_ascii_uppercase();
    if tick.is_empty() {
        return None;
    }

    let mut record = NormalizedRecord {
        p: SRC20_PROTOCOL.to_string(),
        op: kind.as_str().to_string(),
        tick,
        max: None,
        lim: None,
        dec: None,
        amt: None,
        description: None,
        x: None,
        web: None,
        email: None,
        tg: None,
        img: None,
        icon: None,
    };

    match kind {
        SRC20Operation::Deploy => {
            record.max = Some(wire_number(raw.max.as_ref()?)?);
            record.lim = Some(wire_number(raw.lim.as_ref()?)?);
            record.dec = match &raw.dec {
                Some(dec) => Some(wire_decimals(dec)?),
                None => None,
            };
            record.description = raw.description;
            record.x = raw.x;
            record.web = raw.web;
            record.email = raw.email;
            record.tg = raw.tg;
            record.img = raw.img;
            record.icon = raw.icon;
        }
        SRC20Operation::Mint | SRC20Operation::Transfer => {
            record.amt = Some(wire_amount(raw.amt.as_ref()?)?);
        }
    }

    Some(record)
}
