use crate::{
    Clearcoin, EpochResolver, Keypair, OutputIndex, Sha256, Transaction, TransactionId,
    TransactionInput, TransactionOutput, UtxoId, UtxoPool,
};
use clap::{App, Arg, ArgMatches};
use rand::seq::SliceRandom;
use rand::Rng;
use std::error::Error;

const GENESIS_AMOUNT: i64 = 100;

struct SimulateCliOptions {
    wallets: usize,
    epoch_size: usize,
    export: Option<String>,
}

impl SimulateCliOptions {
    pub fn parse(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            wallets: matches.value_of("wallets").unwrap().parse::<usize>()?,
            epoch_size: matches.value_of("epoch-size").unwrap().parse::<usize>()?,
            export: matches.value_of("export").map(|path| path.to_string()),
        })
    }
}

pub fn simulate_command() -> App<'static> {
    App::new("simulate")
        .version("0.1")
        .about("Generates a shuffled epoch of payments and resolves it against a genesis pool.")
        .arg(
            Arg::new("wallets")
                .short('w')
                .long("wallets")
                .value_name("COUNT")
                .about("Number of wallets that receive a genesis output and exchange payments.")
                .takes_value(true)
                .default_value("4"),
        )
        .arg(
            Arg::new("epoch-size")
                .short('n')
                .long("epoch-size")
                .value_name("COUNT")
                .about("Number of candidate transactions in the generated epoch.")
                .takes_value(true)
                .default_value("16"),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .value_name("FILE")
                .about("Writes the accepted transactions to the file, encoded with bincode.")
                .takes_value(true),
        )
}

pub fn run_simulate_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = SimulateCliOptions::parse(matches)?;
    if options.wallets == 0 {
        return Err("At least one wallet is required.".into());
    }

    let wallets: Vec<Keypair> = (0..options.wallets).map(|_| Keypair::generate()).collect();
    let pool = genesis_pool(&wallets);
    let candidates = generate_epoch(&wallets, &pool, options.epoch_size);

    println!(
        "Resolving an epoch of {} candidate slots against a pool of {} UTXOs.",
        candidates.len(),
        pool.len()
    );

    let mut resolver = EpochResolver::new(&pool);
    let accepted = resolver.resolve(candidates);

    println!("Accepted {} transactions:", accepted.len());
    for transaction in &accepted {
        println!("  {}", transaction);
        for output in transaction.outputs() {
            println!("    {}", output);
        }
    }
    print_balances(&wallets, resolver.utxo_pool());

    if let Some(path) = options.export {
        let encoded = bincode::serialize(&accepted).map_err(|e| e.to_string())?;
        std::fs::write(&path, encoded)?;
        println!("Exported the accepted transactions to: {}", path);
    }
    Ok(())
}

/// A pool with one genesis output per wallet. The genesis outputs are seeded
/// directly because the ledger has no coin-creating transaction.
fn genesis_pool(wallets: &Vec<Keypair>) -> UtxoPool {
    let genesis_transaction_id = TransactionId::new(Sha256::digest(b"genesis"));
    let mut pool = UtxoPool::new();
    for (index, wallet) in wallets.iter().enumerate() {
        pool.add(
            UtxoId::new(genesis_transaction_id, OutputIndex::new(index as u32)),
            TransactionOutput::new(wallet.public_key(), Clearcoin::new(GENESIS_AMOUNT)),
        );
    }
    pool
}

/// Generates a chain of random payments between the wallets, starting from
/// the genesis outputs. Each payment spends an output created earlier in the
/// epoch or a genesis output, occasionally leaving a 1 CLC fee. The result
/// is shuffled and interleaved with absent slots, the shape in which an
/// external transaction source hands an epoch to the resolver.
fn generate_epoch(
    wallets: &Vec<Keypair>,
    genesis_pool: &UtxoPool,
    epoch_size: usize,
) -> Vec<Option<Transaction>> {
    let mut rng = rand::thread_rng();
    // Outputs that no generated transaction has spent yet, together with the
    // wallet that owns them.
    let mut spendable: Vec<(UtxoId, usize, i64)> = genesis_pool
        .iter()
        .map(|(utxo_id, output)| {
            let owner = wallets
                .iter()
                .position(|wallet| wallet.public_key() == *output.to())
                .unwrap();
            (*utxo_id, owner, GENESIS_AMOUNT)
        })
        .collect();

    let mut candidates = Vec::new();
    for _ in 0..epoch_size {
        let (claimed_utxo, owner, amount) = spendable.remove(rng.gen_range(0..spendable.len()));
        let recipient = rng.gen_range(0..wallets.len());
        let fee = if amount > 1 && rng.gen_bool(0.25) { 1 } else { 0 };

        let outputs = vec![TransactionOutput::new(
            wallets[recipient].public_key(),
            Clearcoin::new(amount - fee),
        )];
        let signature = wallets[owner].sign(&Transaction::signing_data_for_input(
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

        spendable.push((
            UtxoId::new(*transaction.id(), OutputIndex::new(0)),
            recipient,
            amount - fee,
        ));
        candidates.push(Some(transaction));
    }

    // A transaction source may contain absent slots, which the resolver
    // filters out.
    candidates.push(None);
    candidates.push(None);
    candidates.shuffle(&mut rng);
    candidates
}

fn print_balances(wallets: &Vec<Keypair>, utxo_pool: &UtxoPool) {
    println!("Final balances:");
    for (index, wallet) in wallets.iter().enumerate() {
        let balance: Clearcoin = utxo_pool
            .iter()
            .filter(|(_, output)| *output.to() == wallet.public_key())
            .map(|(_, output)| output.amount())
            .sum();
        println!("  wallet {}: {}", index, balance);
    }
    let total: Clearcoin = utxo_pool.iter().map(|(_, output)| output.amount()).sum();
    let fees = Clearcoin::new(GENESIS_AMOUNT * wallets.len() as i64) - total;
    println!("Implicit fees left unclaimed: {}", fees);
}
