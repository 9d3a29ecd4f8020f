/// Validation and normalisation through the public API
use crate::common::fixtures;
use stamps_codec::encoder::{normalize, parse_operation_json, validate_operation};
use stamps_codec::errors::ValidationIssue;
use stamps_codec::types::{OperationBody, WireAmount, WireNumber};
use stamps_codec::{encode_src20, CodecError, EncodingOptions, TokenOperation};

#[test]
fn test_kevin_normalisation() {
    let record = normalize(&fixtures::kevin_transfer()).unwrap();
    assert_eq!(record.p, "src-20");
    assert_eq!(record.op, "transfer");
    assert_eq!(record.tick, "KEVIN");
    assert_eq!(record.amt, Some(WireAmount::Number(WireNumber::Int(100000))));
    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"p":"src-20","op":"transfer","tick":"KEVIN","amt":100000}"#
    );
}

#[test]
fn test_operation_json_is_case_insensitive() {
    let op = parse_operation_json(
        r#"{"p":"SRC-20","op":"TRANSFER","tick":"kevin","amt":"100000.000000000000000000"}"#,
    )
    .unwrap();
    assert_eq!(op, fixtures::kevin_transfer());
}

#[test]
fn test_ticker_too_long() {
    let errors = validate_operation(&TokenOperation::mint("TOOLONG", "1")).unwrap_err();
    assert!(errors.contains(|i| matches!(i, ValidationIssue::TickerTooLong { len: 7, .. })));
}

#[test]
fn test_ticker_charset() {
    let errors = validate_operation(&TokenOperation::mint("te-st", "1")).unwrap_err();
    assert_eq!(
        errors.issues,
        vec![ValidationIssue::InvalidTickerCharset("te-st".to_string())]
    );
}

#[test]
fn test_u64_bound() {
    let over = TokenOperation::deploy("BIG", "18446744073709551616", "1");
    let errors = validate_operation(&over).unwrap_err();
    assert!(errors.contains(|i| matches!(i, ValidationIssue::NumberOverflow { field: "max", .. })));

    let at_bound = TokenOperation::deploy("BIG", "18446744073709551615", "1");
    assert!(validate_operation(&at_bound).is_ok());
}

#[test]
fn test_all_problems_reported_together() {
    let op = TokenOperation {
        protocol: "brc-20".to_string(),
        tick: "TOO-LONG".to_string(),
        body: OperationBody::Transfer {
            amt: vec!["0".to_string(), "abc".to_string()],
        },
    };
    match encode_src20(&op, &EncodingOptions::default()) {
        Err(CodecError::Validation(errors)) => {
            assert_eq!(errors.issues.len(), 5, "{}", errors);
            assert!(errors.contains(|i| matches!(i, ValidationIssue::InvalidProtocol(_))));
            assert!(errors.contains(|i| matches!(i, ValidationIssue::TickerTooLong { .. })));
            assert!(errors.contains(|i| matches!(i, ValidationIssue::InvalidTickerCharset(_))));
            assert!(errors.contains(|i| matches!(i, ValidationIssue::NonPositive { .. })));
            assert!(errors.contains(|i| matches!(i, ValidationIssue::InvalidNumber { .. })));
        }
        other => panic!("Expected validation errors, got {:?}", other),
    }
}

#[test]
fn test_metadata_reference_format() {
    let mut op = TokenOperation::deploy("STAMP", "1000", "10");
    if let OperationBody::Deploy(params) = &mut op.body {
        params.metadata.img = Some("https://example.com/a.png".to_string());
        params.metadata.icon = Some("ipfs:QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".to_string());
    }
    let errors = validate_operation(&op).unwrap_err();
    assert_eq!(errors.issues.len(), 1);
    assert!(errors.contains(|i| matches!(i, ValidationIssue::InvalidReference { field: "img", .. })));
}

#[test]
fn test_decimals_range() {
    let mut op = TokenOperation::deploy("STAMP", "1000", "10");
    if let OperationBody::Deploy(params) = &mut op.body {
        params.dec = Some(19);
    }
    assert!(validate_operation(&op).is_err());

    if let OperationBody::Deploy(params) = &mut op.body {
        params.dec = Some(18);
    }
    assert!(validate_operation(&op).is_ok());
}
