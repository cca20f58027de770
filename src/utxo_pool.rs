use crate::{OutputIndex, TransactionId, TransactionOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Identifies an unspent transaction output by the transaction that created
/// it and the output's index within that transaction.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct UtxoId {
    transaction_id: TransactionId,
    output_index: OutputIndex,
}

impl UtxoId {
    pub fn new(transaction_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            transaction_id,
            output_index,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }
}

impl Display for UtxoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.output_index)
    }
}

/// A pool of confirmed and unspent transaction outputs.
///
/// Every key present represents a genuinely unclaimed output. An output is
/// removed exactly once, when a transaction that spends it is accepted, and
/// one key per output of the accepted transaction is added in its place.
/// Cloning the pool yields an independent copy, so a caller's pool is never
/// aliased by a resolver that mutates its own.
#[derive(Debug, Clone)]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    pub fn contains(&self, utxo_id: &UtxoId) -> bool {
        self.utxos.contains_key(utxo_id)
    }

    pub fn get(&self, utxo_id: &UtxoId) -> Option<&TransactionOutput> {
        self.utxos.get(utxo_id)
    }

    pub fn add(&mut self, utxo_id: UtxoId, output: TransactionOutput) {
        self.utxos.insert(utxo_id, output);
    }

    pub fn remove(&mut self, utxo_id: &UtxoId) -> Option<TransactionOutput> {
        self.utxos.remove(utxo_id)
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UtxoId, &TransactionOutput)> {
        self.utxos.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Clearcoin, Keypair, Sha256};

    fn utxo_id(tag: &[u8], output_index: u32) -> UtxoId {
        UtxoId::new(
            TransactionId::new(Sha256::digest(tag)),
            OutputIndex::new(output_index),
        )
    }

    fn output(amount: i64) -> TransactionOutput {
        TransactionOutput::new(
            Keypair::from_seed([1; 32]).public_key(),
            Clearcoin::new(amount),
        )
    }

    #[test]
    fn added_utxo_is_found() {
        let mut pool = UtxoPool::new();
        pool.add(utxo_id(b"a", 0), output(10));

        assert!(pool.contains(&utxo_id(b"a", 0)));
        assert_eq!(pool.get(&utxo_id(b"a", 0)), Some(&output(10)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn utxo_ids_differ_by_output_index() {
        let mut pool = UtxoPool::new();
        pool.add(utxo_id(b"a", 0), output(10));

        assert!(!pool.contains(&utxo_id(b"a", 1)));
        assert!(!pool.contains(&utxo_id(b"b", 0)));
    }

    #[test]
    fn removed_utxo_is_gone() {
        let mut pool = UtxoPool::new();
        pool.add(utxo_id(b"a", 0), output(10));

        assert_eq!(pool.remove(&utxo_id(b"a", 0)), Some(output(10)));
        assert!(!pool.contains(&utxo_id(b"a", 0)));
        assert!(pool.is_empty());
    }

    #[test]
    fn removing_an_absent_utxo_is_a_no_op() {
        let mut pool = UtxoPool::new();
        assert_eq!(pool.remove(&utxo_id(b"a", 0)), None);
    }

    #[test]
    fn adding_an_existing_utxo_overwrites_it() {
        let mut pool = UtxoPool::new();
        pool.add(utxo_id(b"a", 0), output(10));
        pool.add(utxo_id(b"a", 0), output(20));

        assert_eq!(pool.get(&utxo_id(b"a", 0)), Some(&output(20)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn cloned_pool_is_independent() {
        let mut source = UtxoPool::new();
        source.add(utxo_id(b"a", 0), output(10));

        let copy = source.clone();
        source.remove(&utxo_id(b"a", 0));
        source.add(utxo_id(b"b", 0), output(20));

        assert!(copy.contains(&utxo_id(b"a", 0)));
        assert!(!copy.contains(&utxo_id(b"b", 0)));
    }
}
