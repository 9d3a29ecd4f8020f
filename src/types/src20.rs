//! SRC-20 token types
//!
//! SRC-20 is a fungible token standard on Bitcoin Stamps. Operations arrive as
//! loosely-typed JSON (`RawOperation`), are validated into a closed
//! `TokenOperation`, and leave the encoder as a `NormalizedRecord` whose field
//! order and casing are the canonical wire shape.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Canonical (lower-case) SRC-20 protocol tag
pub const SRC20_PROTOCOL: &str = "src-20";

/// Display casing of the protocol tag restored on decode
pub const SRC20_PROTOCOL_DISPLAY: &str = "SRC-20";

/// Maximum ticker length in characters
pub const MAX_TICKER_LEN: usize = 5;

/// Maximum `dec` value for a deploy
pub const MAX_DECIMALS: u32 = 18;

/// SRC-20 token operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SRC20Operation {
    /// Deploy a new SRC-20 token
    Deploy,
    /// Mint tokens to an address
    Mint,
    /// Transfer tokens between addresses
    Transfer,
}

impl SRC20Operation {
    /// Wire spelling (lower-case)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Mint => "mint",
            Self::Transfer => "transfer",
        }
    }

    /// Case-insensitive parse of an operation name
    pub fn parse(op: &str) -> Option<Self> {
        match op.trim().to_ascii_lowercase().as_str() {
            "deploy" => Some(Self::Deploy),
            "mint" => Some(Self::Mint),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for SRC20Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_ascii_uppercase())
    }
}

/// Optional DEPLOY metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub description: Option<String>,
    pub x: Option<String>,
    pub web: Option<String>,
    pub email: Option<String>,
    pub tg: Option<String>,
    /// Image reference in `protocol:hash` form (e.g. `ar:<txid>`)
    pub img: Option<String>,
    /// Icon reference in `protocol:hash` form
    pub icon: Option<String>,
}

impl TokenMetadata {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.x.is_none()
            && self.web.is_none()
            && self.email.is_none()
            && self.tg.is_none()
            && self.img.is_none()
            && self.icon.is_none()
    }
}

/// DEPLOY parameters (decimal strings as supplied by the caller)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployParams {
    pub max: String,
    pub lim: String,
    pub dec: Option<u32>,
    #[serde(default)]
    pub metadata: TokenMetadata,
}

/// Per-operation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
    Deploy(DeployParams),
    Mint { amt: String },
    /// One amount per recipient; more than one is carried as a comma-joined string
    Transfer { amt: Vec<String> },
}

/// A validated-shape SRC-20 token operation
///
/// Field contents are still caller-supplied strings; the encoder re-validates
/// them before any bytes are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOperation {
    /// Protocol tag, any casing of `SRC-20`
    pub protocol: String,
    pub tick: String,
    pub body: OperationBody,
}

impl TokenOperation {
    pub fn deploy(tick: &str, max: &str, lim: &str) -> Self {
        Self {
            protocol: SRC20_PROTOCOL_DISPLAY.to_string(),
            tick: tick.to_string(),
            body: OperationBody::Deploy(DeployParams {
                max: max.to_string(),
                lim: lim.to_string(),
                dec: None,
                metadata: TokenMetadata::default(),
            }),
        }
    }

    pub fn mint(tick: &str, amt: &str) -> Self {
        Self {
            protocol: SRC20_PROTOCOL_DISPLAY.to_string(),
            tick: tick.to_string(),
            body: OperationBody::Mint {
                amt: amt.to_string(),
            },
        }
    }

    pub fn transfer(tick: &str, amt: &str) -> Self {
        Self {
            protocol: SRC20_PROTOCOL_DISPLAY.to_string(),
            tick: tick.to_string(),
            body: OperationBody::Transfer {
                amt: vec![amt.to_string()],
            },
        }
    }

    pub fn kind(&self) -> SRC20Operation {
        match self.body {
            OperationBody::Deploy(_) => SRC20Operation::Deploy,
            OperationBody::Mint { .. } => SRC20Operation::Mint,
            OperationBody::Transfer { .. } => SRC20Operation::Transfer,
        }
    }
}

/// Loosely-typed operation as found in user-supplied JSON
///
/// Numbers may be given either as JSON numbers or as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOperation {
    pub p: Option<String>,
    pub op: Option<String>,
    pub tick: Option<String>,
    pub max: Option<serde_json::Value>,
    pub lim: Option<serde_json::Value>,
    pub dec: Option<serde_json::Value>,
    pub amt: Option<serde_json::Value>,
    pub description: Option<String>,
    pub x: Option<String>,
    pub web: Option<String>,
    pub email: Option<String>,
    pub tg: Option<String>,
    pub img: Option<String>,
    pub icon: Option<String>,
}

/// Numeric wire value
///
/// Produced by the best-effort numeric normalisation: integral values are
/// emitted as integers, everything else as a double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireNumber {
    Int(u64),
    Float(f64),
}

impl Serialize for WireNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(n) => serializer.serialize_u64(*n),
            Self::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl fmt::Display for WireNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// `amt` wire value: a number when it normalises cleanly, otherwise the text
#[derive(Debug, Clone, PartialEq)]
pub enum WireAmount {
    Number(WireNumber),
    Text(String),
}

impl Serialize for WireAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => n.serialize(serializer),
            Self::Text(t) => serializer.serialize_str(t),
        }
    }
}

impl fmt::Display for WireAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(t) => write!(f, "{}", t),
        }
    }
}

/// Canonical wire shape of an SRC-20 operation
///
/// Field declaration order is the serialisation order, for both the JSON and the
/// MessagePack encodings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub p: String,
    pub op: String,
    pub tick: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<WireNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lim: Option<WireNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dec: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amt: Option<WireAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NormalizedRecord {
    pub fn kind(&self) -> Option<SRC20Operation> {
        SRC20Operation::parse(&self.op)
    }

    /// Metadata fields in wire order
    pub fn metadata_fields(&self) -> [(&'static str, Option<&String>); 7] {
        [
            ("description", self.description.as_ref()),
            ("x", self.x.as_ref()),
            ("web", self.web.as_ref()),
            ("email", self.email.as_ref()),
            ("tg", self.tg.as_ref()),
            ("img", self.img.as_ref()),
            ("icon", self.icon.as_ref()),
        ]
    }

    /// Restore the caller-facing shape: display casing for the protocol tag and
    /// decimal strings for every numeric field
    pub fn to_operation(&self) -> Option<TokenOperation> {
        let body = match self.kind()? {
            SRC20Operation::Deploy => OperationBody::Deploy(DeployParams {
                max: self.max?.to_string(),
                lim: self.lim?.to_string(),
                dec: self.dec,
                metadata: TokenMetadata {
                    description: self.description.clone(),
                    x: self.x.clone(),
                    web: self.web.clone(),
                    email: self.email.clone(),
                    tg: self.tg.clone(),
                    img: self.img.clone(),
                    icon: self.icon.clone(),
                },
            }),
            SRC20Operation::Mint => OperationBody::Mint {
                amt: self.amt.as_ref()?.to_string(),
            },
            SRC20Operation::Transfer => OperationBody::Transfer {
                amt: self
                    .amt
                    .as_ref()?
                    .to_string()
                    .split(',')
                    .map(|a| a.trim().to_string())
                    .collect(),
            },
        };

        Some(TokenOperation {
            protocol: SRC20_PROTOCOL_DISPLAY.to_string(),
            tick: self.tick.clone(),
            body,
        })
    }
}
