//! Bitcoin Stamps / SRC-20 Transaction Codec
//!
//! Encodes SRC-20 token operations into pseudo-P2WSH data outputs, builds
//! ARC4-obfuscated Counterparty issuance messages for stamps, and decodes both
//! back out of transaction outputs.

pub mod asset_id;
pub mod builder;
pub mod config;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod types;

pub use config::{CodecConfig, EncodingOptions};
pub use decoder::{decode_src20, decode_src20_record, decode_stamp_file, DecodedSrc20};
pub use encoder::{encode_src20, encode_stamp_issuance};
pub use errors::{CodecError, CodecResult};
pub use types::{EncodeNotice, EncodedPayload, EncodedStamp, IssuanceMessage, TokenOperation};
