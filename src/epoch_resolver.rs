use crate::{OutputIndex, Transaction, TransactionValidator, UtxoId, UtxoPool};

/// Resolves one epoch, i.e. an unordered batch of candidate transactions,
/// into a maximal mutually-consistent subset of accepted transactions.
///
/// The resolver owns a copy of the caller's UTXO pool and advances it as
/// transactions are accepted, so candidates within the same epoch may spend
/// outputs created by other candidates. Once accepted, a transaction is
/// never revisited or revoked.
pub struct EpochResolver {
    utxo_pool: UtxoPool,
}

impl EpochResolver {
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self {
            utxo_pool: utxo_pool.clone(),
        }
    }

    /// The pool as advanced by every transaction accepted so far.
    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn is_valid(&self, transaction: &Transaction) -> bool {
        TransactionValidator::is_valid(transaction, &self.utxo_pool)
    }

    /// Accepts a maximal subset of the candidates and applies each accepted
    /// transaction to the pool, in acceptance order. Absent candidate slots
    /// are ignored.
    ///
    /// Candidates are re-scanned until a full pass accepts nothing, because
    /// a candidate may only become valid once another candidate in the same
    /// epoch has supplied the output it depends on. Every earlier pass
    /// accepts at least one transaction and the pending set shrinks with
    /// each acceptance, so the loop terminates after at most
    /// `candidates.len()` passes.
    pub fn resolve(&mut self, candidates: Vec<Option<Transaction>>) -> Vec<Transaction> {
        let mut pending: Vec<Transaction> = candidates.into_iter().flatten().collect();
        let mut accepted = Vec::new();
        loop {
            let mut accepted_in_pass = false;
            // Scan backwards so that accepted transactions can be removed
            // without affecting the indices still to be visited.
            for i in (0..pending.len()).rev() {
                if TransactionValidator::is_valid(&pending[i], &self.utxo_pool) {
                    let transaction = pending.remove(i);
                    self.apply(&transaction);
                    accepted.push(transaction);
                    accepted_in_pass = true;
                }
            }
            if !accepted_in_pass {
                break;
            }
        }
        accepted
    }

    /// Marks the transaction's claimed UTXOs as spent and adds its outputs
    /// as new UTXOs. Must only be called for a transaction that is valid
    /// against the current pool.
    fn apply(&mut self, transaction: &Transaction) {
        for input in transaction.inputs() {
            self.utxo_pool.remove(&input.utxo_id());
        }
        for (output_index, output) in transaction.outputs().iter().enumerate() {
            let utxo_id = UtxoId::new(*transaction.id(), OutputIndex::new(output_index as u32));
            self.utxo_pool.add(utxo_id, output.clone());
        }
    }
}
