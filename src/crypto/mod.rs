/// Cryptographic utilities for Bitcoin data-carrying protocols
///
/// This module provides the ARC4 stream cipher Counterparty uses to obfuscate
/// issuance messages before they are pushed into an OP_RETURN output.
pub mod arc4;
