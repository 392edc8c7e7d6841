//! Unspent transaction output (UTXO) pairing an output with its outpoint.

use wallet_script::Script;

use crate::outpoint::OutPoint;
use crate::output::TransactionOutput;

/// An unspent transaction output available for spending.
///
/// Pairs the output (value and locking script) with the outpoint that
/// identifies it on chain. Candidates for the UTXO selector and the
/// source data for the signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnspentOutput {
    /// The output being spent: value and locking script.
    pub output: TransactionOutput,

    /// The outpoint identifying the output on chain.
    pub out_point: OutPoint,
}

impl UnspentOutput {
    /// Create an unspent output from its parts.
    ///
    /// # Arguments
    /// * `output` - The output's value and locking script.
    /// * `out_point` - The outpoint identifying the output.
    ///
    /// # Returns
    /// A new `UnspentOutput`.
    pub fn new(output: TransactionOutput, out_point: OutPoint) -> Self {
        UnspentOutput { output, out_point }
    }

    /// Create an unspent output from raw parts.
    ///
    /// # Arguments
    /// * `value` - The amount in base units.
    /// * `locking_script` - The locking script of the output.
    /// * `out_point` - The outpoint identifying the output.
    ///
    /// # Returns
    /// A new `UnspentOutput`.
    pub fn from_parts(value: i64, locking_script: Script, out_point: OutPoint) -> Self {
        UnspentOutput {
            output: TransactionOutput::new(value, locking_script),
            out_point,
        }
    }

    /// Return the value of this unspent output in base units.
    ///
    /// # Returns
    /// The output value.
    pub fn value(&self) -> i64 {
        self.output.value
    }
}
