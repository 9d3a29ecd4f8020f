/// ARC4 keystream cipher used to obfuscate Counterparty issuance messages
///
/// ARC4 (also known as RC4) is the obfuscation layer Counterparty applies to every
/// message it embeds. The key is conventionally the first input's transaction ID
/// (32 bytes) and those keys go through the `rc4` crate. The cipher itself accepts
/// keys of any non-zero length; other lengths are scheduled at runtime since `rc4`
/// fixes the key size in the type.
///
/// # Usage
///
/// ```rust
/// use stamps_codec::crypto::arc4;
///
/// let key = arc4::prepare_key_from_txid(
///     "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890",
/// )
/// .unwrap();
/// let data = b"hello world";
///
/// let encrypted = arc4::apply(&key, data).unwrap();
///
/// // ARC4 is symmetric
/// let decrypted = arc4::apply(&key, &encrypted).unwrap();
/// assert_eq!(decrypted, data);
/// ```
use hex;
use rc4::{consts::U32, Key, KeyInit, Rc4, StreamCipher};

/// Length of a transaction-ID key
pub const TXID_KEY_LEN: usize = 32;

/// Size of the ARC4 permutation state
const STATE_SIZE: usize = 256;

/// Keystream generator state
///
/// Built fresh for every call; nothing is shared between invocations so callers on
/// different threads never observe each other's keystream.
struct Arc4State {
    s: [u8; STATE_SIZE],
    i: u8,
    j: u8,
}

impl Arc4State {
    /// Key-scheduling pass. `key` must be non-empty.
    fn new(key: &[u8]) -> Self {
        let mut s = [0u8; STATE_SIZE];
        for (idx, slot) in s.iter_mut().enumerate() {
            *slot = idx as u8;
        }

        let mut j: u8 = 0;
        for i in 0..STATE_SIZE {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }

        Self { s, i: 0, j: 0 }
    }

    /// Generation pass: one keystream byte per call
    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.s[self.i as usize]);
        self.s.swap(self.i as usize, self.j as usize);
        let idx = self.s[self.i as usize].wrapping_add(self.s[self.j as usize]);
        self.s[idx as usize]
    }

    fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_byte();
        }
    }
}

/// XOR `data` with the ARC4 keystream derived from `key`
///
/// ARC4 is symmetric, so this function both encrypts and decrypts. Zero-length
/// data is valid and yields an empty buffer.
///
/// # Returns
///
/// Returns `None` only when the key is empty (the key schedule is undefined).
pub fn apply(key: &[u8], data: &[u8]) -> Option<Vec<u8>> {
    if key.is_empty() {
        return None;
    }

    let mut result = data.to_vec();
    if key.len() == TXID_KEY_LEN {
        let mut cipher = Rc4::new(Key::<U32>::from_slice(key));
        cipher.apply_keystream(&mut result);
    } else {
        Arc4State::new(key).apply_keystream(&mut result);
    }

    Some(result)
}

/// Prepare ARC4 key from transaction input
///
/// For Counterparty issuances the ARC4 key is the funding input's transaction ID,
/// taken as the raw bytes of its hex representation.
///
/// # Returns
///
/// Returns `Some(Vec<u8>)` with the decoded transaction ID bytes, or `None` if
/// decoding fails or the string is empty
pub fn prepare_key_from_txid(txid_hex: &str) -> Option<Vec<u8>> {
    let key = hex::decode(txid_hex.trim()).ok()?;
    if key.is_empty() {
        return None;
    }
    Some(key)
}
