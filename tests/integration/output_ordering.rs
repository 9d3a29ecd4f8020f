/// Carrier placement per operation kind
use crate::common::{embedded_outputs, fixtures, RECIPIENT, SENDER};
use bitcoin::{Amount, Network};
use stamps_codec::encoder::address_script;
use stamps_codec::{encode_src20, CodecError, EncodeNotice, EncodingOptions};

#[test]
fn test_transfer_carrier_goes_to_recipient() {
    let options = EncodingOptions::default()
        .with_from(SENDER)
        .with_to(RECIPIENT);
    let encoded = encode_src20(&fixtures::kevin_transfer(), &options).unwrap();

    assert_eq!(encoded.outputs.len(), 1 + encoded.chunk_count);
    assert_eq!(
        encoded.outputs[0].script_pubkey,
        address_script(RECIPIENT, Network::Bitcoin).unwrap()
    );
    assert_eq!(encoded.outputs[0].value, Amount::from_sat(330));
    assert_eq!(embedded_outputs(&encoded.outputs), encoded.outputs[1..].to_vec());
}

#[test]
fn test_deploy_carrier_goes_to_sender() {
    let options = EncodingOptions::default().with_from(SENDER);
    let encoded = encode_src20(&fixtures::plain_deploy(), &options).unwrap();
    assert_eq!(
        encoded.outputs[0].script_pubkey,
        address_script(SENDER, Network::Bitcoin).unwrap()
    );
    assert!(encoded.outputs[1..]
        .iter()
        .all(|o| o.script_pubkey.is_p2wsh()));
}

#[test]
fn test_mint_ignores_recipient() {
    let options = EncodingOptions::default()
        .with_from(SENDER)
        .with_to(RECIPIENT);
    let encoded = encode_src20(&fixtures::stamp_mint(), &options).unwrap();
    assert_eq!(
        encoded.outputs[0].script_pubkey,
        address_script(SENDER, Network::Bitcoin).unwrap()
    );
    assert!(!encoded
        .outputs
        .iter()
        .any(|o| o.script_pubkey == address_script(RECIPIENT, Network::Bitcoin).unwrap()));
}

#[test]
fn test_without_addresses_only_embedded_outputs() {
    let encoded = encode_src20(&fixtures::kevin_transfer(), &EncodingOptions::default()).unwrap();
    assert_eq!(encoded.outputs.len(), encoded.chunk_count);
    assert!(encoded.notices.contains(&EncodeNotice::CarrierOmitted));
}

#[test]
fn test_transfer_with_only_sender_has_no_carrier() {
    let options = EncodingOptions::default().with_from(SENDER);
    let encoded = encode_src20(&fixtures::kevin_transfer(), &options).unwrap();
    assert_eq!(encoded.outputs.len(), encoded.chunk_count);
    assert!(encoded.notices.contains(&EncodeNotice::CarrierOmitted));

    // the sender is never substituted for a missing recipient
    let sender_script = address_script(SENDER, Network::Bitcoin).unwrap();
    assert!(encoded
        .outputs
        .iter()
        .all(|o| o.script_pubkey != sender_script && o.script_pubkey.is_p2wsh()));
}

#[test]
fn test_custom_dust_value_applies_everywhere() {
    let options = EncodingOptions {
        dust_value: 546,
        ..EncodingOptions::default()
    }
    .with_to(RECIPIENT);
    let encoded = encode_src20(&fixtures::kevin_transfer(), &options).unwrap();
    assert!(encoded
        .outputs
        .iter()
        .all(|o| o.value == Amount::from_sat(546)));
    assert_eq!(
        encoded.total_value(),
        Amount::from_sat(546 * encoded.outputs.len() as u64)
    );
}

#[test]
fn test_malformed_address_rejected() {
    let options = EncodingOptions::default().with_to("not-an-address");
    match encode_src20(&fixtures::kevin_transfer(), &options) {
        Err(CodecError::Address { address, .. }) => assert_eq!(address, "not-an-address"),
        other => panic!("Expected address error, got {:?}", other),
    }
}
