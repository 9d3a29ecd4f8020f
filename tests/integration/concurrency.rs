/// Encode / decode calls share no state and run safely in parallel
use crate::common::{fixtures, KEY_TXID};
use stamps_codec::crypto::arc4;
use stamps_codec::{decode_src20_record, encode_src20, EncodingOptions, TokenOperation};

#[test]
fn test_parallel_roundtrips_match_sequential() {
    let ops: Vec<TokenOperation> = (0..16)
        .map(|i| match i % 3 {
            0 => fixtures::kevin_transfer(),
            1 => TokenOperation::mint("STAMP", &format!("{}", i * 100 + 1)),
            _ => fixtures::verbose_deploy(),
        })
        .collect();
    let options = EncodingOptions::default();

    let sequential: Vec<_> = ops
        .iter()
        .map(|op| encode_src20(op, &options).unwrap().outputs)
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = ops
            .iter()
            .map(|op| {
                let options = &options;
                scope.spawn(move || {
                    let encoded = encode_src20(op, options).unwrap();
                    let decoded = decode_src20_record(&encoded.outputs).unwrap();
                    (encoded.outputs, decoded.record.tick)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for ((outputs, tick), expected) in parallel.iter().zip(&sequential) {
        assert_eq!(outputs, expected);
        assert!(tick == "KEVIN" || tick == "STAMP");
    }
}

#[test]
fn test_parallel_cipher_with_distinct_keys() {
    let base = arc4::prepare_key_from_txid(KEY_TXID).unwrap();
    let plaintext = b"CNTRPRTY parallel keystream check".to_vec();

    std::thread::scope(|scope| {
        for i in 0..8u8 {
            let mut key = base.clone();
            key[0] ^= i;
            let plaintext = &plaintext;
            scope.spawn(move || {
                let encrypted = arc4::apply(&key, plaintext).unwrap();
                assert_eq!(&arc4::apply(&key, &encrypted).unwrap(), plaintext);
            });
        }
    });
}
