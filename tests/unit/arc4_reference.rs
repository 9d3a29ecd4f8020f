/// ARC4 cross-checks against the `rc4` crate
///
/// Transaction-ID keys go through `rc4` directly; every other key length is
/// scheduled by the codec and must produce the same keystream `rc4` would.
use rc4::{consts::U32, Key, KeyInit, Rc4, StreamCipher};
use stamps_codec::crypto::arc4;

fn reference_apply(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut cipher = Rc4::new(Key::<U32>::from_slice(key));
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    buf
}

fn sample_key(seed: u8, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| seed.wrapping_mul(31).wrapping_add((i as u8).wrapping_mul(7)))
        .collect()
}

#[test]
fn test_matches_reference_for_txid_keys() {
    let key = arc4::prepare_key_from_txid(crate::common::KEY_TXID).unwrap();
    assert_eq!(key.len(), 32);

    for len in [0usize, 1, 8, 31, 32, 33, 80, 255, 1024] {
        let data: Vec<u8> = (0..len).map(|i| (i * 13 % 256) as u8).collect();
        assert_eq!(
            arc4::apply(&key, &data).unwrap(),
            reference_apply(&key, &data),
            "keystream mismatch for {} bytes",
            len
        );
    }
}

#[test]
fn test_symmetry_across_key_and_data_lengths() {
    for key_len in [1usize, 5, 16, 32, 64, 256] {
        let key = sample_key(key_len as u8, key_len);
        for data_len in [0usize, 1, 17, 300] {
            let data: Vec<u8> = (0..data_len).map(|i| (i % 251) as u8).collect();
            let encrypted = arc4::apply(&key, &data).unwrap();
            assert_eq!(encrypted.len(), data.len());
            assert_eq!(arc4::apply(&key, &encrypted).unwrap(), data);
        }
    }
}

#[test]
fn test_every_call_starts_fresh() {
    let key = sample_key(3, 32);
    let first = arc4::apply(&key, b"CNTRPRTY").unwrap();
    let second = arc4::apply(&key, b"CNTRPRTY").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_short_key_matches_repeated_txid_key() {
    // Same key bytes repeated to 32 schedule identically to the short key
    let short = sample_key(9, 16);
    let doubled: Vec<u8> = short.iter().chain(short.iter()).copied().collect();
    let data = b"CNTRPRTY issuance body";
    assert_eq!(
        arc4::apply(&short, data).unwrap(),
        reference_apply(&doubled, data)
    );
}

#[test]
fn test_empty_key_rejected() {
    assert_eq!(arc4::apply(&[], b"data"), None);
    assert_eq!(arc4::prepare_key_from_txid(""), None);
    assert_eq!(arc4::prepare_key_from_txid("xyz"), None);
}
