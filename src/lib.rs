pub mod amount;
pub mod commands;
pub mod hash;
pub mod logging;
pub mod public_key;
pub mod signature;
pub mod snapshot;
pub mod transaction;
pub mod tx_handler;
pub mod utxo;
pub mod utxo_pool;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use self::{
    amount::*, hash::*, public_key::*, signature::*, snapshot::*, transaction::*, tx_handler::*,
    utxo::*, utxo_pool::*, validation::*,
};
