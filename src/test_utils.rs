//! Fixtures shared by the unit tests: deterministic keys, a funded pool and signing helpers.

use crate::{
    Amount, OutputIndex, PublicKey, Sha256, Transaction, TransactionId, TransactionInput,
    TransactionOutput, Utxo, UtxoPool,
};
use ed25519_dalek::{Signer, SigningKey};

pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn public_key(key: &SigningKey) -> PublicKey {
    PublicKey::from(key.verifying_key())
}

pub fn genesis_id(seed: u8) -> TransactionId {
    TransactionId::new(Sha256::digest(&[b'g', seed]))
}

pub fn genesis_utxo(seed: u8) -> Utxo {
    Utxo::new(genesis_id(seed), OutputIndex::new(0))
}

/// A pool holding one output per (seed, key, amount), each the first output of its own
/// genesis transaction.
pub fn pool_with(outputs: &[(u8, &SigningKey, i64)]) -> UtxoPool {
    let mut pool = UtxoPool::new();
    for (seed, key, amount) in outputs {
        pool.add_utxo(
            genesis_utxo(*seed),
            TransactionOutput::new(Amount::new(*amount), public_key(key)),
        );
    }
    pool
}

/// Builds a transaction spending `inputs`, each signed by the paired key.
pub fn signed_transaction(
    inputs: &[(Utxo, &SigningKey)],
    outputs: &[(i64, &SigningKey)],
) -> Transaction {
    let mut transaction = Transaction::new(
        inputs
            .iter()
            .map(|(utxo, _)| TransactionInput::new(*utxo.transaction_id(), *utxo.output_index()))
            .collect(),
        outputs
            .iter()
            .map(|(amount, key)| TransactionOutput::new(Amount::new(*amount), public_key(key)))
            .collect(),
    );
    for (index, (_, key)) in inputs.iter().enumerate() {
        let message = transaction.raw_data_to_sign(index).unwrap();
        transaction
            .add_signature(index, key.sign(&message).into())
            .unwrap();
    }
    transaction.finalize();
    transaction
}

/// The output `index` of the given transaction as it will be keyed in the pool.
pub fn output_of(transaction: &Transaction, index: u32) -> Utxo {
    Utxo::new(*transaction.id(), OutputIndex::new(index))
}
