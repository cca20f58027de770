use crate::{Clearcoin, PublicKey, Sha256, Signature, UtxoId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// The index of the transaction output, the first one is 0.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct OutputIndex(u32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn to_le_bytes(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

/// A claim of an unspent transaction output, authorized by a signature from
/// the output's owner.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    // 32 bytes. A pointer to the transaction containing the UTXO to be spent.
    transaction_id: TransactionId,
    // 4 bytes. The number of the UTXO to be spent within that transaction.
    output_index: OutputIndex,
    // 64 bytes. Signs the transaction's signing data for this input's position.
    signature: Signature,
}

impl TransactionInput {
    pub fn new(
        transaction_id: TransactionId,
        output_index: OutputIndex,
        signature: Signature,
    ) -> Self {
        Self {
            transaction_id,
            output_index,
            signature,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The UTXO that this input claims.
    pub fn utxo_id(&self) -> UtxoId {
        UtxoId::new(self.transaction_id, self.output_index)
    }
}

/// A new output created by a transaction, spendable by the owner of `to`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    to: PublicKey,
    amount: Clearcoin,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.amount, self.to)
    }
}

impl TransactionOutput {
    pub fn new(to: PublicKey, amount: Clearcoin) -> Self {
        Self { to, amount }
    }

    pub fn to(&self) -> &PublicKey {
        &self.to
    }

    pub fn amount(&self) -> Clearcoin {
        self.amount
    }
}

/// A transfer of coins from unspent outputs of prior transactions to a new
/// set of outputs. The identifier is derived from the transaction data, so
/// structurally identical transactions have the same identifier and the
/// identifier is stable across copies.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let id = Self::hash_transaction_data(&inputs, &outputs);
        Self {
            id,
            inputs,
            outputs,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// The byte sequence that the input at `input_index` must sign.
    ///
    /// It covers the input's position, the UTXO it claims, and every output,
    /// and excludes all signatures. A signature is therefore bound to one
    /// input position and cannot be replayed at another.
    pub fn signing_data(&self, input_index: usize) -> Vec<u8> {
        let input = &self.inputs[input_index];
        Self::signing_data_for_input(
            &input.transaction_id,
            &input.output_index,
            &self.outputs,
            input_index as u32,
        )
    }

    /// Same as [`Transaction::signing_data`], but usable before the
    /// transaction is assembled: sign first, then attach the signature to
    /// the input.
    pub fn signing_data_for_input(
        claimed_transaction_id: &TransactionId,
        claimed_output_index: &OutputIndex,
        outputs: &Vec<TransactionOutput>,
        input_index: u32,
    ) -> Vec<u8> {
        // All integers are encoded as little-endian, which keeps the data
        // platform-independent.
        let mut data = Vec::new();
        data.extend_from_slice(&input_index.to_le_bytes());
        data.extend_from_slice(claimed_transaction_id.as_slice());
        data.extend_from_slice(&claimed_output_index.to_le_bytes());
        for output in outputs {
            data.extend_from_slice(&output.amount.to_le_bytes());
            data.extend_from_slice(output.to.as_slice());
        }
        data
    }

    fn hash_transaction_data(
        inputs: &Vec<TransactionInput>,
        outputs: &Vec<TransactionOutput>,
    ) -> TransactionId {
        let mut data = Vec::new();
        for input in inputs {
            data.extend_from_slice(input.transaction_id.as_slice());
            data.extend_from_slice(&input.output_index.to_le_bytes());
            data.extend_from_slice(input.signature.as_slice());
        }
        for output in outputs {
            data.extend_from_slice(&output.amount.to_le_bytes());
            data.extend_from_slice(output.to.as_slice());
        }
        TransactionId(Sha256::double_digest(&data))
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} inputs, {} outputs)",
            self.id,
            self.inputs.len(),
            self.outputs.len()
        )
    }
}
