//! SRC-20 operation validation
//!
//! Every rule runs on every call and failures are collected, so a caller sees
//! all problems with an operation in one pass. Nothing is encoded until the
//! operation validates cleanly.

use crate::errors::{ValidationErrors, ValidationIssue};
use crate::types::src20::{
    DeployParams, OperationBody, RawOperation, TokenMetadata, TokenOperation, MAX_DECIMALS,
    MAX_TICKER_LEN, SRC20_PROTOCOL,
};
use crate::types::SRC20Operation;
use serde_json::Value;
use std::num::IntErrorKind;

/// Byte limit for the deploy description
pub const MAX_DESCRIPTION_LEN: usize = 250;

/// Byte limit for the other text metadata fields
pub const MAX_METADATA_LEN: usize = 100;

/// Longest hash accepted in a `protocol:hash` reference
pub const MAX_REFERENCE_HASH_LEN: usize = 128;

/// Storage protocols accepted in `img` / `icon` references
pub const REFERENCE_PROTOCOLS: [&str; 4] = ["ar", "ipfs", "fs", "ord"];

/// 2^64, the first value a JSON number cannot carry as u64
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// A validated non-negative decimal string split at the decimal point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub integer: u64,
    /// Fractional digits with trailing zeros removed
    pub fraction: String,
}

impl Decimal {
    pub fn is_zero(&self) -> bool {
        self.integer == 0 && self.fraction.is_empty()
    }

    pub fn is_integral(&self) -> bool {
        self.fraction.is_empty()
    }

    /// Shortest decimal spelling (`100000.000` -> `100000`, `1.50` -> `1.5`)
    pub fn canonical(&self) -> String {
        if self.fraction.is_empty() {
            self.integer.to_string()
        } else {
            format!("{}.{}", self.integer, self.fraction)
        }
    }
}

/// Accepted protocol spellings
pub fn is_src20_protocol(p: &str) -> bool {
    let p = p.trim().to_ascii_lowercase();
    p == SRC20_PROTOCOL || p == "src20"
}

/// Parse a decimal string bounded by the unsigned 64-bit range
pub fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, ValidationIssue> {
    let trimmed = value.trim();
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (trimmed, None),
    };

    let invalid = || ValidationIssue::InvalidNumber {
        field,
        value: value.to_string(),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if let Some(f) = frac_part {
        if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
    }

    let integer = int_part.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ValidationIssue::NumberOverflow {
            field,
            value: value.to_string(),
        },
        _ => invalid(),
    })?;

    let fraction = frac_part
        .map(|f| f.trim_end_matches('0').to_string())
        .unwrap_or_default();

    // u64::MAX.5 is still above the bound
    if integer == u64::MAX && !fraction.is_empty() {
        return Err(ValidationIssue::NumberOverflow {
            field,
            value: value.to_string(),
        });
    }

    Ok(Decimal { integer, fraction })
}

/// Parse a required positive decimal, recording any issue
fn check_positive(field: &'static str, value: &str, issues: &mut Vec<ValidationIssue>) {
    match parse_decimal(field, value) {
        Ok(d) if d.is_zero() => issues.push(ValidationIssue::NonPositive {
            field,
            value: value.to_string(),
        }),
        Ok(_) => {}
        Err(issue) => issues.push(issue),
    }
}

fn check_ticker(tick: &str, issues: &mut Vec<ValidationIssue>) {
    let tick = tick.trim();
    if tick.is_empty() {
        issues.push(ValidationIssue::EmptyTicker);
        return;
    }
    let len = tick.chars().count();
    if len > MAX_TICKER_LEN {
        issues.push(ValidationIssue::TickerTooLong {
            tick: tick.to_string(),
            len,
        });
    }
    if !tick.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push(ValidationIssue::InvalidTickerCharset(tick.to_string()));
    }
}

/// `protocol:hash`, e.g. `ar:Hdw...` or `ipfs:Qm...`
pub fn is_valid_reference(value: &str) -> bool {
    let Some((protocol, hash)) = value.trim().split_once(':') else {
        return false;
    };
    REFERENCE_PROTOCOLS.contains(&protocol)
        && !hash.is_empty()
        && hash.len() <= MAX_REFERENCE_HASH_LEN
        && hash
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
}

fn check_metadata(metadata: &TokenMetadata, issues: &mut Vec<ValidationIssue>) {
    let text_fields = [
        ("description", &metadata.description, MAX_DESCRIPTION_LEN),
        ("x", &metadata.x, MAX_METADATA_LEN),
        ("web", &metadata.web, MAX_METADATA_LEN),
        ("email", &metadata.email, MAX_METADATA_LEN),
        ("tg", &metadata.tg, MAX_METADATA_LEN),
    ];
    for (field, value, limit) in text_fields {
        if let Some(v) = value {
            let len = v.trim().len();
            if len > limit {
                issues.push(ValidationIssue::FieldTooLong { field, len, limit });
            }
        }
    }

    for (field, value) in [("img", &metadata.img), ("icon", &metadata.icon)] {
        if let Some(v) = value {
            if !v.trim().is_empty() && !is_valid_reference(v) {
                issues.push(ValidationIssue::InvalidReference {
                    field,
                    value: v.clone(),
                });
            }
        }
    }
}

fn check_deploy(params: &DeployParams, issues: &mut Vec<ValidationIssue>) {
    check_positive("max", &params.max, issues);
    check_positive("lim", &params.lim, issues);
    if let Some(dec) = params.dec {
        if dec > MAX_DECIMALS {
            issues.push(ValidationIssue::DecimalsOutOfRange(dec.to_string()));
        }
    }
    check_metadata(&params.metadata, issues);
}

fn collect_issues(op: &TokenOperation, issues: &mut Vec<ValidationIssue>) {
    if op.protocol.trim().is_empty() {
        issues.push(ValidationIssue::MissingProtocol);
    } else if !is_src20_protocol(&op.protocol) {
        issues.push(ValidationIssue::InvalidProtocol(op.protocol.clone()));
    }

    check_ticker(&op.tick, issues);

    match &op.body {
        OperationBody::Deploy(params) => check_deploy(params, issues),
        OperationBody::Mint { amt } => check_positive("amt", amt, issues),
        OperationBody::Transfer { amt } => {
            if amt.is_empty() {
                issues.push(ValidationIssue::MissingField("amt"));
            }
            for a in amt {
                check_positive("amt", a, issues);
            }
        }
    }
}

/// Validate a token operation, reporting every failed rule together
pub fn validate_operation(op: &TokenOperation) -> Result<(), ValidationErrors> {
    let mut issues = Vec::new();
    collect_issues(op, &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(issues))
    }
}

/// Render a JSON number or string as a decimal string
fn numeric_text(field: &'static str, value: &Value) -> Result<String, ValidationIssue> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        // Integers beyond u64 arrive as f64 and print in exponent form
        Value::Number(n)
            if n.as_u64().is_none() && n.as_f64().is_some_and(|f| f >= U64_BOUND) =>
        {
            Err(ValidationIssue::NumberOverflow {
                field,
                value: n.to_string(),
            })
        }
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ValidationIssue::InvalidNumber {
            field,
            value: other.to_string(),
        }),
    }
}

fn required_numeric(
    field: &'static str,
    value: &Option<Value>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::MissingField(field));
            None
        }
        Some(v) => match numeric_text(field, v) {
            Ok(s) => Some(s),
            Err(issue) => {
                issues.push(issue);
                None
            }
        },
    }
}

/// Transfer amounts: a single value, an array, or a comma-separated string
fn transfer_amounts(value: &Option<Value>, issues: &mut Vec<ValidationIssue>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match numeric_text("amt", v) {
                Ok(s) => Some(s),
                Err(issue) => {
                    issues.push(issue);
                    None
                }
            })
            .collect(),
        other => required_numeric("amt", other, issues)
            .map(|s| s.split(',').map(|a| a.trim().to_string()).collect())
            .unwrap_or_default(),
    }
}

fn parse_dec(value: &Option<Value>, issues: &mut Vec<ValidationIssue>) -> Option<u32> {
    let value = value.as_ref().filter(|v| !v.is_null())?;
    let text = match numeric_text("dec", value) {
        Ok(t) => t,
        Err(issue) => {
            issues.push(issue);
            return None;
        }
    };
    match text.parse::<u32>() {
        Ok(dec) => Some(dec),
        Err(_) => {
            issues.push(ValidationIssue::DecimalsOutOfRange(text));
            None
        }
    }
}

/// Turn loosely-typed JSON input into a `TokenOperation`
///
/// Shape problems (missing fields, unknown operation) and value problems are all
/// collected; an operation is returned only when there are none.
pub fn parse_raw_operation(raw: &RawOperation) -> Result<TokenOperation, ValidationErrors> {
    let mut issues = Vec::new();

    let protocol = raw.p.clone().unwrap_or_default();
    let tick = raw.tick.clone().unwrap_or_default();

    let kind = match raw.op.as_deref() {
        None => {
            issues.push(ValidationIssue::MissingOperation);
            None
        }
        Some(op) => {
            let parsed = SRC20Operation::parse(op);
            if parsed.is_none() {
                issues.push(ValidationIssue::InvalidOperation(op.to_string()));
            }
            parsed
        }
    };

    let body = kind.and_then(|kind| match kind {
        SRC20Operation::Deploy => {
            let max = required_numeric("max", &raw.max, &mut issues);
            let lim = required_numeric("lim", &raw.lim, &mut issues);
            let dec = parse_dec(&raw.dec, &mut issues);
            Some(OperationBody::Deploy(DeployParams {
                max: max?,
                lim: lim?,
                dec,
                metadata: TokenMetadata {
                    description: raw.description.clone(),
                    x: raw.x.clone(),
                    web: raw.web.clone(),
                    email: raw.email.clone(),
                    tg: raw.tg.clone(),
                    img: raw.img.clone(),
                    icon: raw.icon.clone(),
                },
            }))
        }
        SRC20Operation::Mint => required_numeric("amt", &raw.amt, &mut issues)
            .map(|amt| OperationBody::Mint { amt }),
        SRC20Operation::Transfer => Some(OperationBody::Transfer {
            amt: transfer_amounts(&raw.amt, &mut issues),
        }),
    });

    let op = body.map(|body| TokenOperation {
        protocol: protocol.clone(),
        tick: tick.clone(),
        body,
    });

    match op {
        Some(op) => {
            collect_issues(&op, &mut issues);
            if issues.is_empty() {
                Ok(op)
            } else {
                Err(ValidationErrors::new(dedup(issues)))
            }
        }
        None => {
            // Still report protocol / ticker problems alongside the shape ones
            if protocol.trim().is_empty() {
                issues.push(ValidationIssue::MissingProtocol);
            } else if !is_src20_protocol(&protocol) {
                issues.push(ValidationIssue::InvalidProtocol(protocol));
            }
            check_ticker(&tick, &mut issues);
            Err(ValidationErrors::new(dedup(issues)))
        }
    }
}

/// Parse and validate an operation from JSON text
pub fn parse_operation_json(json: &str) -> Result<TokenOperation, ValidationErrors> {
    let raw: RawOperation = serde_json::from_str(json).map_err(|e| {
        ValidationErrors::new(vec![ValidationIssue::InvalidOperation(format!(
            "unparseable JSON: {}",
            e
        ))])
    })?;
    parse_raw_operation(&raw)
}

fn dedup(issues: Vec<ValidationIssue>) -> Vec<ValidationIssue> {
    let mut unique: Vec<ValidationIssue> = Vec::with_capacity(issues.len());
    for issue in issues {
        if !unique.contains(&issue) {
            unique.push(issue);
        }
    }
    unique
}
