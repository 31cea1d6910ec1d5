use crate::{Amount, TransactionOutput, Utxo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pool of confirmed and unspent transaction outputs.
///
/// Cloning the pool makes an independent copy: mutating either pool afterwards doesn't affect
/// the other.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UtxoPool {
    // Unspent transaction outputs, indexed by their transaction ID and their index in the
    // transaction.
    utxos: HashMap<Utxo, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    pub fn get(&self, utxo: &Utxo) -> Option<&TransactionOutput> {
        self.utxos.get(utxo)
    }

    /// Adds the output to the pool, replacing and returning any output previously stored
    /// under the same id.
    pub fn add_utxo(&mut self, utxo: Utxo, output: TransactionOutput) -> Option<TransactionOutput> {
        self.utxos.insert(utxo, output)
    }

    /// Removes the output from the pool. Removing an id that isn't in the pool does nothing.
    pub fn remove_utxo(&mut self, utxo: &Utxo) -> Option<TransactionOutput> {
        self.utxos.remove(utxo)
    }

    /// Returns the ids of all unspent outputs in no particular order.
    pub fn all_utxos(&self) -> Vec<Utxo> {
        self.utxos.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Utxo, &TransactionOutput)> {
        self.utxos.iter()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// The value held by all unspent outputs, or None if it doesn't fit in an amount.
    pub fn total_value(&self) -> Option<Amount> {
        Amount::checked_sum(self.utxos.values().map(TransactionOutput::amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputIndex, PublicKey, Sha256, TransactionId};

    fn utxo(seed: u8, index: u32) -> Utxo {
        Utxo::new(
            TransactionId::new(Sha256::digest(&[seed])),
            OutputIndex::new(index),
        )
    }

    fn output(amount: i64) -> TransactionOutput {
        TransactionOutput::new(Amount::new(amount), PublicKey::new([amount as u8; 32]))
    }

    #[test]
    fn add_then_lookup() {
        let mut pool = UtxoPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.add_utxo(utxo(1, 0), output(10)), None);

        assert!(pool.contains(&utxo(1, 0)));
        assert!(!pool.contains(&utxo(1, 1)));
        assert_eq!(pool.get(&utxo(1, 0)), Some(&output(10)));
        assert_eq!(pool.get(&utxo(2, 0)), None);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn add_overwrites_existing_output() {
        let mut pool = UtxoPool::new();
        pool.add_utxo(utxo(1, 0), output(10));
        assert_eq!(pool.add_utxo(utxo(1, 0), output(20)), Some(output(10)));
        assert_eq!(pool.get(&utxo(1, 0)), Some(&output(20)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn remove_absent_utxo_is_noop() {
        let mut pool = UtxoPool::new();
        pool.add_utxo(utxo(1, 0), output(10));
        assert_eq!(pool.remove_utxo(&utxo(9, 9)), None);
        assert_eq!(pool.len(), 1);

        assert_eq!(pool.remove_utxo(&utxo(1, 0)), Some(output(10)));
        assert!(!pool.contains(&utxo(1, 0)));
        assert_eq!(pool.remove_utxo(&utxo(1, 0)), None);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = UtxoPool::new();
        original.add_utxo(utxo(1, 0), output(10));

        let mut copy = original.clone();
        copy.remove_utxo(&utxo(1, 0));
        copy.add_utxo(utxo(2, 0), output(5));
        original.add_utxo(utxo(3, 0), output(1));

        assert!(original.contains(&utxo(1, 0)));
        assert!(!original.contains(&utxo(2, 0)));
        assert!(!copy.contains(&utxo(1, 0)));
        assert!(!copy.contains(&utxo(3, 0)));
    }

    #[test]
    fn all_utxos_and_total_value() {
        let mut pool = UtxoPool::new();
        pool.add_utxo(utxo(1, 0), output(10));
        pool.add_utxo(utxo(1, 1), output(15));

        let mut utxos = pool.all_utxos();
        utxos.sort();
        let mut expected = vec![utxo(1, 0), utxo(1, 1)];
        expected.sort();
        assert_eq!(utxos, expected);
        assert_eq!(pool.total_value(), Some(Amount::new(25)));
    }
}
