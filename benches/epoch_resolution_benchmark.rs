use clearcoin_lib::{
    Clearcoin, EpochResolver, Keypair, OutputIndex, Sha256, Transaction, TransactionId,
    TransactionInput, TransactionOutput, UtxoId, UtxoPool,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const CHAIN_LENGTH: usize = 50;

/// Builds a chain of payments where each transaction spends the previous
/// transaction's output, ordered so that the resolver's backwards scan
/// visits them dependency-last. This is the worst case: every pass accepts
/// exactly one transaction.
fn payment_chain(keypair: &Keypair) -> (UtxoPool, Vec<Option<Transaction>>) {
    let genesis_transaction_id = TransactionId::new(Sha256::digest(b"genesis"));
    let mut pool = UtxoPool::new();
    pool.add(
        UtxoId::new(genesis_transaction_id, OutputIndex::new(0)),
        TransactionOutput::new(keypair.public_key(), Clearcoin::new(10)),
    );

    let mut claimed_utxo = UtxoId::new(genesis_transaction_id, OutputIndex::new(0));
    let mut candidates = Vec::new();
    for _ in 0..CHAIN_LENGTH {
        let outputs = vec![TransactionOutput::new(
            keypair.public_key(),
            Clearcoin::new(10),
        )];
        let signature = keypair.sign(&Transaction::signing_data_for_input(
            claimed_utxo.transaction_id(),
            claimed_utxo.output_index(),
            &outputs,
            0,
        ));
        let transaction = Transaction::new(
            vec![TransactionInput::new(
                *claimed_utxo.transaction_id(),
                *claimed_utxo.output_index(),
                signature,
            )],
            outputs,
        );
        claimed_utxo = UtxoId::new(*transaction.id(), OutputIndex::new(0));
        candidates.push(Some(transaction));
    }
    (pool, candidates)
}

fn epoch_resolution_benchmark(c: &mut Criterion) {
    let keypair = Keypair::from_seed([1; 32]);
    let (pool, candidates) = payment_chain(&keypair);

    c.bench_function("resolve_dependency_chain_of_50", |b| {
        b.iter(|| {
            let mut resolver = EpochResolver::new(&pool);
            let accepted = resolver.resolve(black_box(candidates.clone()));
            assert_eq!(accepted.len(), CHAIN_LENGTH);
            accepted
        })
    });
}

criterion_group!(benches, epoch_resolution_benchmark);
criterion_main!(benches);
