//! Canonical normalisation of SRC-20 operations
//!
//! Protocol tag and operation are lower-cased, the ticker upper-cased, and decimal
//! strings become wire numbers. Numeric conversion goes through an IEEE double,
//! exactly as every other SRC-20 implementation does, so integers above 2^53 lose
//! precision. That loss is part of the wire format and is reported, not corrected.

use crate::encoder::validation::{parse_decimal, validate_operation, Decimal};
use crate::errors::ValidationErrors;
use crate::types::src20::{
    NormalizedRecord, OperationBody, TokenMetadata, TokenOperation, WireAmount, WireNumber,
    SRC20_PROTOCOL,
};
use crate::types::EncodeNotice;
use tracing::debug;

/// Largest integer a double represents exactly
pub const PRECISION_CEILING: u64 = 1 << 53;

/// Best-effort numeric normalisation of a validated decimal
///
/// Contract: the decimal is parsed as an `f64` and clamped to `>= 0`. Integral
/// results become `WireNumber::Int` (saturating at `u64::MAX`), others stay
/// `WireNumber::Float`. Inputs above 2^53 are not represented exactly; the second
/// tuple element is `true` whenever that ceiling was crossed.
pub fn best_effort_number(decimal: &Decimal) -> (WireNumber, bool) {
    let value: f64 = decimal.canonical().parse().unwrap_or(0.0);
    let value = value.max(0.0);
    let lossy = decimal.integer > PRECISION_CEILING;

    if value.fract() == 0.0 {
        // `as` saturates, so 2^64 (the double nearest u64::MAX) maps to u64::MAX
        (WireNumber::Int(value as u64), lossy)
    } else {
        (WireNumber::Float(value), lossy)
    }
}

fn number_field(
    field: &'static str,
    text: &str,
    notices: &mut Vec<EncodeNotice>,
) -> Result<WireNumber, ValidationErrors> {
    let decimal = parse_decimal(field, text).map_err(|i| ValidationErrors::new(vec![i]))?;
    let (number, lossy) = best_effort_number(&decimal);
    if lossy {
        debug!(field, value = text, "numeric field above 2^53 normalised lossily");
        notices.push(EncodeNotice::PrecisionLoss {
            field,
            value: text.to_string(),
        });
    }
    Ok(number)
}

/// A single amount is a number when it has at most one fractional digit after
/// trailing zeros are dropped, otherwise its canonical decimal text
fn single_amount(
    text: &str,
    notices: &mut Vec<EncodeNotice>,
) -> Result<WireAmount, ValidationErrors> {
    let decimal = parse_decimal("amt", text).map_err(|i| ValidationErrors::new(vec![i]))?;
    if decimal.fraction.len() <= 1 {
        number_field("amt", text, notices).map(WireAmount::Number)
    } else {
        Ok(WireAmount::Text(decimal.canonical()))
    }
}

fn clean_text(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn apply_metadata(record: &mut NormalizedRecord, metadata: &TokenMetadata) {
    record.description = clean_text(&metadata.description);
    record.x = clean_text(&metadata.x);
    record.web = clean_text(&metadata.web);
    record.email = clean_text(&metadata.email);
    record.tg = clean_text(&metadata.tg);
    record.img = clean_text(&metadata.img);
    record.icon = clean_text(&metadata.icon);
}

/// Validate and normalise, collecting lossy-conversion notices
pub fn normalize_with_notices(
    op: &TokenOperation,
) -> Result<(NormalizedRecord, Vec<EncodeNotice>), ValidationErrors> {
    validate_operation(op)?;

    let mut notices = Vec::new();
    let mut record = NormalizedRecord {
        p: SRC20_PROTOCOL.to_string(),
        op: op.kind().as_str().to_string(),
        tick: op.tick.trim().to_ascii_uppercase(),
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

    match &op.body {
        OperationBody::Deploy(params) => {
            record.max = Some(number_field("max", &params.max, &mut notices)?);
            record.lim = Some(number_field("lim", &params.lim, &mut notices)?);
            record.dec = params.dec;
            apply_metadata(&mut record, &params.metadata);
        }
        OperationBody::Mint { amt } => {
            record.amt = Some(single_amount(amt, &mut notices)?);
        }
        OperationBody::Transfer { amt } => {
            record.amt = Some(match amt.as_slice() {
                [single] => single_amount(single, &mut notices)?,
                many => WireAmount::Text(
                    many.iter()
                        .map(|a| a.trim())
                        .collect::<Vec<_>>()
                        .join(","),
                ),
            });
        }
    }

    Ok((record, notices))
}

/// Validate and normalise a token operation into its canonical wire record
pub fn normalize(op: &TokenOperation) -> Result<NormalizedRecord, ValidationErrors> {
    normalize_with_notices(op).map(|(record, _)| record)
}
