use std::fmt;
use thiserror::Error;

/// Codec-wide error type - single point of truth
///
/// Encode-path failures only. Decoding a transaction that does not carry this
/// protocol's data is reported as `None`, never as an error.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Caller-fixable problems with the token operation, all collected in one pass
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Limits that a configuration change resolves
    #[error("Capacity exceeded: {0}")]
    Capacity(#[from] CapacityError),

    /// Structural problems in an issuance message
    #[error("Issuance error: {0}")]
    Issuance(#[from] IssuanceError),

    /// Asset name could not be mapped to an asset ID
    #[error("Asset error: {0}")]
    AssetId(#[from] crate::asset_id::AssetIdError),

    /// Carrier address could not be turned into an output script
    #[error("Invalid address {address}: {reason}")]
    Address { address: String, reason: String },

    /// External UTXO selection failed
    #[error("Input selection failed ({reason}): {message}")]
    Selection { reason: String, message: String },

    /// A change output is needed but no sender address was given
    #[error("No sender address for a change output of {0} sat")]
    MissingChangeAddress(u64),

    /// ARC4 key could not be derived
    #[error("Invalid obfuscation key: {0}")]
    InvalidKey(String),

    /// JSON / MessagePack / zlib serialisation failure
    #[error("Serialisation error: {0}")]
    Serialization(String),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingProtocol,
    InvalidProtocol(String),
    MissingOperation,
    InvalidOperation(String),
    EmptyTicker,
    TickerTooLong { tick: String, len: usize },
    InvalidTickerCharset(String),
    MissingField(&'static str),
    InvalidNumber { field: &'static str, value: String },
    NumberOverflow { field: &'static str, value: String },
    NonPositive { field: &'static str, value: String },
    DecimalsOutOfRange(String),
    InvalidReference { field: &'static str, value: String },
    FieldTooLong { field: &'static str, len: usize, limit: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProtocol => write!(f, "missing protocol tag"),
            Self::InvalidProtocol(p) => write!(f, "invalid protocol tag '{}'", p),
            Self::MissingOperation => write!(f, "missing operation"),
            Self::InvalidOperation(op) => write!(f, "invalid operation '{}'", op),
            Self::EmptyTicker => write!(f, "ticker is empty"),
            Self::TickerTooLong { tick, len } => {
                write!(f, "ticker '{}' is {} characters (max 5)", tick, len)
            }
            Self::InvalidTickerCharset(tick) => {
                write!(f, "ticker '{}' must be alphanumeric", tick)
            }
            Self::MissingField(field) => write!(f, "missing required field '{}'", field),
            Self::InvalidNumber { field, value } => {
                write!(f, "'{}' is not a valid decimal number: '{}'", field, value)
            }
            Self::NumberOverflow { field, value } => {
                write!(f, "'{}' exceeds the unsigned 64-bit range: {}", field, value)
            }
            Self::NonPositive { field, value } => {
                write!(f, "'{}' must be greater than zero: {}", field, value)
            }
            Self::DecimalsOutOfRange(dec) => write!(f, "dec must be within 0..=18, got {}", dec),
            Self::InvalidReference { field, value } => {
                write!(f, "'{}' must be in protocol:hash form, got '{}'", field, value)
            }
            Self::FieldTooLong { field, len, limit } => {
                write!(f, "'{}' is {} bytes (max {})", field, len, limit)
            }
        }
    }
}

/// Every validation rule that failed for one token operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn contains(&self, predicate: impl Fn(&ValidationIssue) -> bool) -> bool {
        self.issues.iter().any(predicate)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Limits that can be raised by the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// Payload needs more embedding outputs than the configured ceiling
    #[error("payload needs {required} outputs, limit is {limit}")]
    TooManyOutputs { required: usize, limit: usize },

    /// Obfuscated issuance message does not fit the OP_RETURN data ceiling
    #[error("issuance message is {size} bytes, OP_RETURN limit is {limit}; shorten the description")]
    DescriptionTooLong { size: usize, limit: usize },
}

/// Structural failures while reading an issuance message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    #[error("Script is not a single-push OP_RETURN")]
    NotOpReturn,

    #[error("Decrypted data does not start with the Counterparty prefix")]
    PrefixMismatch,

    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(u8),

    #[error("Insufficient payload length: expected at least {expected} bytes, got {actual}")]
    InsufficientLength { expected: usize, actual: usize },

    #[error("Invalid obfuscation key")]
    InvalidKey,
}

/// Codec-wide result type - single point of truth
pub type CodecResult<T> = Result<T, CodecError>;

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Serialization(format!("I/O error: {}", err))
    }
}

impl From<config::ConfigError> for CodecError {
    fn from(err: config::ConfigError) -> Self {
        CodecError::Config(err.to_string())
    }
}
