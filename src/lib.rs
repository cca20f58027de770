pub mod clearcoin;
pub mod commands;
pub mod epoch_resolver;
pub mod hash;
pub mod public_key;
pub mod transaction;
pub mod transaction_validator;
pub mod utxo_pool;

pub use self::{
    clearcoin::*, epoch_resolver::*, hash::*, public_key::*, transaction::*,
    transaction_validator::*, utxo_pool::*,
};
