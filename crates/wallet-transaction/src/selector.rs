//! UTXO selection for transfer construction.
//!
//! Picks a set of unspent outputs to fund a target amount plus an
//! estimated fee, preferring the fewest inputs whose sum lands close to
//! twice the target and avoiding dust change when possible.

use crate::unspent::UnspentOutput;
use crate::TransactionError;

/// Estimated serialized size of one signed P2PKH input, in bytes.
const INPUT_SIZE: i64 = 148;
/// Estimated serialized size of one P2PKH output, in bytes.
const OUTPUT_SIZE: i64 = 34;
/// Fixed transaction overhead (version, counts, lock time), in bytes.
const BASE_SIZE: i64 = 10;

/// Selects unspent outputs to cover a target value plus fees.
///
/// Selection runs over candidate sets drawn from the value-sorted UTXO
/// list and proceeds in two phases. The first phase requires the selected
/// sum to exceed the target, the fee, and the dust threshold, and prefers
/// the candidate whose sum is closest to twice the target so a healthy
/// change output remains. The second phase relaxes the dust requirement,
/// accepting selections whose change would be discarded into the fee.
#[derive(Clone, Copy, Debug)]
pub struct UnspentSelector {
    /// Fee rate in base units per byte.
    pub byte_fee: i64,

    /// Change below this threshold is considered dust.
    pub dust_threshold: i64,
}

impl Default for UnspentSelector {
    fn default() -> Self {
        UnspentSelector {
            byte_fee: 1,
            dust_threshold: 3 * 182 + 1000,
        }
    }
}

impl UnspentSelector {
    /// Create a selector with the given fee rate and the default dust
    /// threshold.
    ///
    /// # Arguments
    /// * `byte_fee` - Fee rate in base units per byte.
    ///
    /// # Returns
    /// A new `UnspentSelector`.
    pub fn new(byte_fee: i64) -> Self {
        UnspentSelector {
            byte_fee,
            ..Default::default()
        }
    }

    /// Create a selector with explicit fee rate and dust threshold.
    ///
    /// # Arguments
    /// * `byte_fee` - Fee rate in base units per byte.
    /// * `dust_threshold` - Change below this value is treated as dust.
    ///
    /// # Returns
    /// A new `UnspentSelector`.
    pub fn with_dust_threshold(byte_fee: i64, dust_threshold: i64) -> Self {
        UnspentSelector {
            byte_fee,
            dust_threshold,
        }
    }

    /// Estimate the fee for a transaction with the given input and output
    /// counts at this selector's fee rate.
    ///
    /// # Arguments
    /// * `inputs` - Number of transaction inputs.
    /// * `outputs` - Number of transaction outputs.
    ///
    /// # Returns
    /// The estimated fee in base units.
    pub fn calculate_fee(&self, inputs: usize, outputs: usize) -> i64 {
        let size = INPUT_SIZE * inputs as i64 + OUTPUT_SIZE * outputs as i64 + BASE_SIZE;
        size * self.byte_fee
    }

    /// Select unspent outputs covering `target_value` plus the estimated
    /// fee.
    ///
    /// A non-positive target selects nothing with a zero fee. The fee is
    /// estimated for two outputs (recipient plus change).
    ///
    /// # Arguments
    /// * `utxos` - The available unspent outputs.
    /// * `target_value` - The amount to fund, in base units.
    ///
    /// # Returns
    /// The selected outputs in ascending value order and the estimated
    /// fee, or `TransactionError::InsufficientFunds` when no selection
    /// covers the target.
    pub fn select(
        &self,
        utxos: &[UnspentOutput],
        target_value: i64,
    ) -> Result<(Vec<UnspentOutput>, i64), TransactionError> {
        if target_value <= 0 {
            return Ok((Vec::new(), 0));
        }

        let total: i64 = utxos.iter().map(|u| u.value()).sum();
        if utxos.is_empty() || total < target_value {
            return Err(TransactionError::InsufficientFunds);
        }

        let mut sorted = utxos.to_vec();
        sorted.sort_by_key(|u| u.value());

        let double_target = target_value * 2;
        let dist_from_2x = |sum: i64| (sum - double_target).abs();

        // Phase 1: fewest inputs that cover target, fee, and a non-dust
        // change, preferring sums near twice the target.
        for num_inputs in 1..=sorted.len() {
            let fee = self.calculate_fee(num_inputs, 2);
            let threshold = target_value + fee + self.dust_threshold;

            let best = sorted
                .windows(num_inputs)
                .filter(|w| slice_sum(w) >= threshold)
                .min_by_key(|w| dist_from_2x(slice_sum(w)));
            if let Some(window) = best {
                return Ok((window.to_vec(), fee));
            }
        }

        // Phase 2: accept selections whose change would be dust.
        for num_inputs in 1..=sorted.len() {
            let fee = self.calculate_fee(num_inputs, 2);
            let threshold = target_value + fee;

            let found = sorted.windows(num_inputs).find(|w| slice_sum(w) >= threshold);
            if let Some(window) = found {
                return Ok((window.to_vec(), fee));
            }
        }

        Err(TransactionError::InsufficientFunds)
    }
}

fn slice_sum(utxos: &[UnspentOutput]) -> i64 {
    utxos.iter().map(|u| u.value()).sum()
}
