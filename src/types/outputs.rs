//! Encode results and structured encode notices

use bitcoin::{Amount, TxOut};
use serde::Serialize;

/// Structured diagnostics raised while encoding
///
/// Each notice is also emitted as a `tracing` event; callers that do not install
/// a subscriber can read them from the encode result instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EncodeNotice {
    /// Packed + deflated form was strictly smaller and replaced the JSON
    CompressionApplied {
        verbatim_len: usize,
        compressed_len: usize,
    },
    /// JSON kept; `compressed_len` is `None` when the payload was under the threshold
    CompressionSkipped {
        verbatim_len: usize,
        compressed_len: Option<usize>,
    },
    /// Numeric field above 2^53 went through a lossy double conversion
    PrecisionLoss { field: &'static str, value: String },
    /// Payload is longer than the 1-byte length header can express
    TruncatedLengthHeader { payload_len: usize },
    /// No address was available for the carrier output; caller must add one
    CarrierOmitted,
}

/// Result of encoding one SRC-20 operation
#[derive(Debug, Clone)]
pub struct EncodedPayload {
    /// Final ordered outputs: carrier (if any) then embedded data outputs
    pub outputs: Vec<TxOut>,
    /// Whether the packed + deflated serialisation was used
    pub compressed: bool,
    /// Tagged payload length before framing
    pub payload_len: usize,
    /// Number of embedded data outputs
    pub chunk_count: usize,
    pub notices: Vec<EncodeNotice>,
}

impl EncodedPayload {
    /// Sum of every output value
    pub fn total_value(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

/// Result of assembling a stamp issuance
#[derive(Debug, Clone)]
pub struct EncodedStamp {
    /// OP_RETURN issuance envelope first, then carrier, then embedded file outputs
    pub outputs: Vec<TxOut>,
    /// Obfuscated issuance message as pushed into the OP_RETURN
    pub obfuscated_message: Vec<u8>,
    pub chunk_count: usize,
    pub notices: Vec<EncodeNotice>,
}

impl EncodedStamp {
    pub fn total_value(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}
