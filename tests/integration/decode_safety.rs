/// Speculative decoding of arbitrary outputs never fails loudly
use crate::common::{fixtures, SENDER};
use bitcoin::hashes::Hash;
use bitcoin::{Amount, ScriptBuf, TxOut, WScriptHash};
use stamps_codec::encoder::address_script;
use stamps_codec::{decode_src20, decode_stamp_file, encode_src20, EncodingOptions};

fn embedding_output(block: [u8; 32]) -> TxOut {
    TxOut {
        value: Amount::from_sat(330),
        script_pubkey: ScriptBuf::new_p2wsh(&WScriptHash::from_byte_array(block)),
    }
}

/// Deterministic xorshift noise
fn noise_blocks(seed: u64, count: usize) -> Vec<[u8; 32]> {
    let mut state = seed.max(1);
    (0..count)
        .map(|_| {
            let mut block = [0u8; 32];
            for byte in block.iter_mut() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                *byte = state as u8;
            }
            block
        })
        .collect()
}

#[test]
fn test_random_noise_decodes_to_none() {
    for seed in 1..=64u64 {
        let outputs: Vec<TxOut> = noise_blocks(seed, 1 + (seed as usize % 4))
            .into_iter()
            .map(embedding_output)
            .collect();
        assert!(decode_src20(&outputs).is_none(), "seed {} decoded", seed);
    }
}

#[test]
fn test_no_embedding_outputs() {
    assert!(decode_src20(&[]).is_none());
    let carrier = TxOut {
        value: Amount::from_sat(330),
        script_pubkey: address_script(SENDER, bitcoin::Network::Bitcoin).unwrap(),
    };
    assert!(decode_src20(&[carrier.clone()]).is_none());
    assert!(decode_stamp_file(&[carrier]).is_none());
}

#[test]
fn test_all_zero_block() {
    assert!(decode_src20(&[embedding_output([0u8; 32])]).is_none());
}

#[test]
fn test_truncated_payload() {
    let encoded = encode_src20(&fixtures::verbose_deploy(), &EncodingOptions::default()).unwrap();
    let truncated = &encoded.outputs[..encoded.outputs.len() - 1];
    assert!(decode_src20(truncated).is_none());
}

#[test]
fn test_corrupted_compressed_payload() {
    let encoded = encode_src20(&fixtures::verbose_deploy(), &EncodingOptions::default()).unwrap();
    assert!(encoded.compressed);

    let mut outputs = encoded.outputs.clone();
    let mut block = [0u8; 32];
    block.copy_from_slice(&outputs[0].script_pubkey.as_bytes()[2..]);
    // Flip bits inside the deflate stream, after header and tag
    for byte in block[10..20].iter_mut() {
        *byte ^= 0xA5;
    }
    outputs[0] = embedding_output(block);
    assert!(decode_src20(&outputs).is_none());
}

#[test]
fn test_reordered_outputs_do_not_decode() {
    let encoded = encode_src20(&fixtures::verbose_deploy(), &EncodingOptions::default()).unwrap();
    let mut outputs = encoded.outputs.clone();
    outputs.reverse();
    assert!(decode_src20(&outputs).is_none());
}
