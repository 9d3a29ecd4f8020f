//! Bitcoin Stamps / Counterparty Codec - Type System
//!
//! - `src20`: SRC-20 token operations and their normalised wire record
//! - `counterparty`: Counterparty issuance message types and constants
//! - `stamps`: Bitcoin Stamps signature variants
//! - `outputs`: Encode results and structured encode notices

pub mod counterparty;
pub mod outputs;
pub mod src20;
pub mod stamps;

pub use counterparty::{IssuanceFlags, IssuanceMessage, COUNTERPARTY_PREFIX};
pub use outputs::{EncodeNotice, EncodedPayload, EncodedStamp};
pub use src20::{
    DeployParams, NormalizedRecord, OperationBody, RawOperation, SRC20Operation,
    TokenMetadata, TokenOperation, WireAmount, WireNumber,
};
pub use stamps::StampSignature;
