//! Common Test Utilities
//!
//! Shared fixtures and helpers for the unit and integration test trees.

#![allow(dead_code)]

use bitcoin::TxOut;
use stamps_codec::types::src20::OperationBody;
use stamps_codec::TokenOperation;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Mainnet P2PKH (genesis coinbase)
pub const SENDER: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

/// Mainnet P2WPKH
pub const RECIPIENT: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";

/// Funding txid used as the ARC4 key
pub const KEY_TXID: &str = "da3ed1efda82824cb24ea081ef2a8f532a7dd9cd1ebc5efa873498c3958c864e";

/// Operation fixtures
pub mod fixtures {
    use super::*;

    pub fn kevin_transfer() -> TokenOperation {
        TokenOperation {
            protocol: "SRC-20".to_string(),
            tick: "kevin".to_string(),
            body: OperationBody::Transfer {
                amt: vec!["100000.000000000000000000".to_string()],
            },
        }
    }

    pub fn stamp_mint() -> TokenOperation {
        TokenOperation::mint("STAMP", "1000")
    }

    /// Deploy with enough repetitive metadata that compression wins
    pub fn verbose_deploy() -> TokenOperation {
        let mut op = TokenOperation::deploy("STAMP", "21000000", "1000");
        if let OperationBody::Deploy(params) = &mut op.body {
            params.dec = Some(8);
            params.metadata.description = Some("The original stamp token. ".repeat(9));
            params.metadata.web = Some("https://stampchain.io".to_string());
            params.metadata.img = Some("ar:UP3I3SfiEeBDHIvnMWxd2LNTmJzoF9cDVvnyQXW2fXI".to_string());
        }
        op
    }

    /// Deploy whose JSON is short but over the compression threshold
    pub fn plain_deploy() -> TokenOperation {
        TokenOperation::deploy("KEVIN", "21000000", "1000")
    }
}

/// Only the pseudo-P2WSH data outputs
pub fn embedded_outputs(outputs: &[TxOut]) -> Vec<TxOut> {
    outputs
        .iter()
        .filter(|o| o.script_pubkey.is_p2wsh())
        .cloned()
        .collect()
}
