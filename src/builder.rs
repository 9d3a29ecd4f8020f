//! Transaction-builder seam
//!
//! The codec core never touches the network. Input selection and fee estimation
//! are supplied by the caller through `UtxoSelector` and `FeeRateEstimator`;
//! `fund_outputs` only sizes the change output from the selection totals.

use crate::config::EncodingOptions;
use crate::encoder::assembler::address_script;
use crate::errors::{CodecError, CodecResult};
use bitcoin::{Amount, OutPoint, ScriptBuf, TxOut};
use std::fmt;
use tracing::{debug, info};

/// Fixed transaction overhead in vbytes (version, locktime, counts, segwit marker)
pub const TX_OVERHEAD_VBYTES: u64 = 11;

/// Typical P2WPKH input size in vbytes
pub const INPUT_VBYTES: u64 = 68;

/// A spendable output offered to the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendableInput {
    pub outpoint: OutPoint,
    pub value: Amount,
    pub script_pubkey: ScriptBuf,
}

/// Why a selection failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFailure {
    InsufficientFunds,
    NoSpendableOutputs,
    FeeTooHigh,
    Other,
}

impl fmt::Display for SelectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InsufficientFunds => "insufficient funds",
            Self::NoSpendableOutputs => "no spendable outputs",
            Self::FeeTooHigh => "fee too high",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Discriminated result of an external UTXO selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Success {
        inputs: Vec<SpendableInput>,
        total_value: Amount,
        change: Amount,
        fee: Amount,
    },
    Failure {
        reason: SelectionFailure,
        message: String,
        details: Option<String>,
    },
}

/// Picks inputs covering `target` plus the fee at `fee_rate` sat/vB
pub trait UtxoSelector {
    fn select(&self, target: Amount, fee_rate: u64, outputs: &[TxOut]) -> SelectionOutcome;
}

/// Supplies the fee rate used for selection
pub trait FeeRateEstimator {
    /// Fee rate in sat/vB
    fn sat_per_vbyte(&self) -> u64;

    /// Estimated virtual size for `input_count` inputs and the given outputs
    fn estimate_vsize(&self, input_count: usize, outputs: &[TxOut]) -> u64 {
        estimate_vsize(input_count, outputs)
    }
}

/// Constant fee rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFeeRate(pub u64);

impl FeeRateEstimator for FixedFeeRate {
    fn sat_per_vbyte(&self) -> u64 {
        self.0
    }
}

/// Rough virtual size: overhead, P2WPKH inputs, and each output's value,
/// script length byte and script
pub fn estimate_vsize(input_count: usize, outputs: &[TxOut]) -> u64 {
    let outputs_size: u64 = outputs
        .iter()
        .map(|o| 8 + 1 + o.script_pubkey.len() as u64)
        .sum();
    TX_OVERHEAD_VBYTES + INPUT_VBYTES * input_count as u64 + outputs_size
}

/// Inputs and final outputs ready for signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundedOutputs {
    pub inputs: Vec<SpendableInput>,
    pub outputs: Vec<TxOut>,
    pub fee: Amount,
    /// Change paid back to the sender, if it reached the dust value
    pub change: Option<Amount>,
}

/// Select inputs for `outputs` and append change to the sender
///
/// Change below the dust value is left to the fee.
pub fn fund_outputs(
    mut outputs: Vec<TxOut>,
    selector: &dyn UtxoSelector,
    estimator: &dyn FeeRateEstimator,
    options: &EncodingOptions,
) -> CodecResult<FundedOutputs> {
    let target: Amount = outputs.iter().map(|o| o.value).sum();
    let fee_rate = estimator.sat_per_vbyte();
    debug!(target = target.to_sat(), fee_rate, "selecting inputs");

    let (inputs, total_value, change, fee) = match selector.select(target, fee_rate, &outputs) {
        SelectionOutcome::Success {
            inputs,
            total_value,
            change,
            fee,
        } => (inputs, total_value, change, fee),
        SelectionOutcome::Failure {
            reason,
            message,
            details,
        } => {
            let message = match details {
                Some(details) => format!("{} ({})", message, details),
                None => message,
            };
            return Err(CodecError::Selection {
                reason: reason.to_string(),
                message,
            });
        }
    };

    let change = if change.to_sat() >= options.dust_value {
        let sender = options
            .from_address
            .as_deref()
            .ok_or(CodecError::MissingChangeAddress(change.to_sat()))?;
        outputs.push(TxOut {
            value: change,
            script_pubkey: address_script(sender, options.network)?,
        });
        Some(change)
    } else {
        None
    };

    info!(
        inputs = inputs.len(),
        total_value = total_value.to_sat(),
        fee = fee.to_sat(),
        change = change.map_or(0, |c| c.to_sat()),
        "funded outputs"
    );

    Ok(FundedOutputs {
        inputs,
        outputs,
        fee,
        change,
    })
}
