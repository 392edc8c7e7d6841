//! Unsigned transfer construction.

use wallet_script::Address;

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::transaction::Transaction;
use crate::unspent::UnspentOutput;
use crate::TransactionError;

/// Build an unsigned transfer spending the given unspent outputs.
///
/// Creates one input per UTXO in the given order, a recipient output for
/// `amount`, and a change output for whatever the UTXOs cover beyond the
/// amount and fee. No change output is created when nothing is left over.
///
/// # Arguments
/// * `to` - Destination address.
/// * `amount` - Amount to send, in base units.
/// * `fee` - Fee to leave for miners, in base units.
/// * `change_address` - Address receiving the change.
/// * `utxos` - The unspent outputs to spend.
///
/// # Returns
/// An unsigned `Transaction`, or `TransactionError::InsufficientFunds`
/// when the UTXOs do not cover the amount plus the fee.
pub fn build_transfer(
    to: &Address,
    amount: i64,
    fee: i64,
    change_address: &Address,
    utxos: &[UnspentOutput],
) -> Result<Transaction, TransactionError> {
    let total: i64 = utxos.iter().map(|u| u.value()).sum();
    if total < amount + fee {
        return Err(TransactionError::InsufficientFunds);
    }
    let change = total - amount - fee;

    let mut tx = Transaction::new();
    tx.add_output(TransactionOutput::new(amount, to.locking_script()));
    if change > 0 {
        tx.add_output(TransactionOutput::new(
            change,
            change_address.locking_script(),
        ));
    }
    for utxo in utxos {
        tx.add_input(TransactionInput::new(utxo.out_point));
    }
    Ok(tx)
}
