//! Output assembler
//!
//! Orders the final output list. SRC-20 transactions carry one dust-valued
//! carrier output ahead of the embedded data outputs:
//!
//! - TRANSFER: carrier paid to the recipient (`to_address`)
//! - DEPLOY / MINT: carrier paid to the sender (`from_address`)
//!
//! Without the relevant address only the embedded outputs are returned and the
//! caller adds the carrier itself. Change and inputs are the external builder's job.

use crate::config::EncodingOptions;
use crate::errors::{CodecError, CodecResult};
use crate::types::{EncodeNotice, SRC20Operation};
use bitcoin::address::{Address, NetworkUnchecked};
use bitcoin::{Amount, Network, ScriptBuf, TxOut};
use tracing::warn;

/// Who receives the carrier output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierRole {
    Sender,
    Recipient,
}

/// Carrier policy per operation kind
pub fn carrier_role(kind: SRC20Operation) -> CarrierRole {
    match kind {
        SRC20Operation::Transfer => CarrierRole::Recipient,
        SRC20Operation::Deploy | SRC20Operation::Mint => CarrierRole::Sender,
    }
}

/// Convert an address string to its output script on `network`
pub fn address_script(address: &str, network: Network) -> CodecResult<ScriptBuf> {
    let unchecked: Address<NetworkUnchecked> =
        address.trim().parse().map_err(|e| CodecError::Address {
            address: address.to_string(),
            reason: format!("{}", e),
        })?;
    let checked = unchecked
        .require_network(network)
        .map_err(|e| CodecError::Address {
            address: address.to_string(),
            reason: format!("{}", e),
        })?;
    Ok(checked.script_pubkey())
}

/// Dust-valued output paying `address`
pub fn carrier_to(address: &str, options: &EncodingOptions) -> CodecResult<TxOut> {
    Ok(TxOut {
        value: Amount::from_sat(options.dust_value),
        script_pubkey: address_script(address, options.network)?,
    })
}

/// Carrier output for `kind`, or `None` when the address it needs is absent
pub fn carrier_output(
    kind: SRC20Operation,
    options: &EncodingOptions,
) -> CodecResult<Option<TxOut>> {
    let address = match carrier_role(kind) {
        CarrierRole::Recipient => options.to_address.as_deref(),
        CarrierRole::Sender => options.from_address.as_deref(),
    };
    address.map(|a| carrier_to(a, options)).transpose()
}

/// Carrier first, then every embedded output in order
pub fn assemble_outputs(
    kind: SRC20Operation,
    embedded: Vec<TxOut>,
    options: &EncodingOptions,
    notices: &mut Vec<EncodeNotice>,
) -> CodecResult<Vec<TxOut>> {
    let mut outputs = Vec::with_capacity(embedded.len() + 1);
    match carrier_output(kind, options)? {
        Some(carrier) => outputs.push(carrier),
        None => {
            warn!(
                operation = %kind,
                role = ?carrier_role(kind),
                "no carrier address supplied; caller must add the carrier output"
            );
            notices.push(EncodeNotice::CarrierOmitted);
        }
    }
    outputs.extend(embedded);
    Ok(outputs)
}

/// Stamp issuance ordering: OP_RETURN envelope, sender carrier, embedded file data
pub fn assemble_stamp_outputs(
    issuance: TxOut,
    embedded: Vec<TxOut>,
    options: &EncodingOptions,
    notices: &mut Vec<EncodeNotice>,
) -> CodecResult<Vec<TxOut>> {
    let mut outputs = Vec::with_capacity(embedded.len() + 2);
    outputs.push(issuance);
    match options.from_address.as_deref() {
        Some(address) => outputs.push(carrier_to(address, options)?),
        None => notices.push(EncodeNotice::CarrierOmitted),
    }
    outputs.extend(embedded);
    Ok(outputs)
}
