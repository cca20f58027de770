use crate::{Clearcoin, Transaction, UtxoPool};
use std::collections::HashSet;

/// Responsible for checking whether a single transaction can be applied to
/// the current UTXO pool. The checks never mutate the pool or the
/// transaction, so a transaction that fails validation leaves no trace.
pub struct TransactionValidator {}

impl TransactionValidator {
    /// A transaction is valid if and only if:
    ///   - every input claims a UTXO that is currently in the pool,
    ///   - no UTXO is claimed by more than one of its inputs,
    ///   - every input carries a valid signature by the claimed output's
    ///     owner over the transaction's signing data for that input,
    ///   - every output amount is non-negative,
    ///   - the claimed input amounts cover the output amounts. The surplus,
    ///     if any, is an implicit fee.
    pub fn is_valid(transaction: &Transaction, utxo_pool: &UtxoPool) -> bool {
        Self::validate(transaction, utxo_pool).is_ok()
    }

    /// Same checks as [`TransactionValidator::is_valid`], but reports why
    /// the transaction has been rejected.
    pub fn validate(transaction: &Transaction, utxo_pool: &UtxoPool) -> Result<(), String> {
        let input_value_sum = Self::validate_inputs(transaction, utxo_pool)?;
        let output_value_sum = Self::validate_outputs_are_non_negative(transaction)?;
        Self::validate_inputs_cover_outputs(input_value_sum, output_value_sum)
    }

    /// Checks the inputs in order and returns the sum of the claimed amounts.
    fn validate_inputs(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<Clearcoin, String> {
        let mut input_value_sum = Clearcoin::zero();
        // UTXOs claimed by the inputs processed so far. Two inputs of the same
        // transaction may point at the same UTXO, which the pool membership
        // check alone would not catch.
        let mut claimed_utxos = HashSet::new();
        for (input_index, input) in transaction.inputs().iter().enumerate() {
            let utxo_id = input.utxo_id();
            if !utxo_pool.contains(&utxo_id) {
                return Err(format!(
                    "Input {} claims UTXO {} which is not in the pool",
                    input_index, utxo_id
                ));
            }
            if !claimed_utxos.insert(utxo_id) {
                return Err(format!(
                    "Input {} claims UTXO {} which an earlier input already claims",
                    input_index, utxo_id
                ));
            }
            let utxo = match utxo_pool.get(&utxo_id) {
                Some(utxo) => utxo,
                None => {
                    return Err(format!(
                        "Input {} claims UTXO {} which has no output record",
                        input_index, utxo_id
                    ))
                }
            };
            let signing_data = transaction.signing_data(input_index);
            if !utxo.to().verify(&signing_data, input.signature()) {
                return Err(format!(
                    "Input {} is not signed by the owner of UTXO {}",
                    input_index, utxo_id
                ));
            }
            input_value_sum = input_value_sum + utxo.amount();
        }
        Ok(input_value_sum)
    }

    /// Checks the outputs and returns the sum of their amounts.
    fn validate_outputs_are_non_negative(transaction: &Transaction) -> Result<Clearcoin, String> {
        let mut output_value_sum = Clearcoin::zero();
        for (output_index, output) in transaction.outputs().iter().enumerate() {
            if output.amount().is_negative() {
                return Err(format!(
                    "Output {} has a negative amount: {}",
                    output_index,
                    output.amount()
                ));
            }
            output_value_sum = output_value_sum + output.amount();
        }
        Ok(output_value_sum)
    }

    fn validate_inputs_cover_outputs(
        input_value_sum: Clearcoin,
        output_value_sum: Clearcoin,
    ) -> Result<(), String> {
        if input_value_sum < output_value_sum {
            Err(format!(
                "Input amounts: {} do not cover output amounts: {}",
                input_value_sum, output_value_sum
            ))
        } else {
            Ok(())
        }
    }
}
