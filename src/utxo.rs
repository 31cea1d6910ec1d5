use crate::{OutputIndex, TransactionId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifies a transaction output by the transaction that created it and its position in
/// that transaction's outputs.
/// Ordered by transaction id first, then by output index.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
pub struct Utxo {
    transaction_id: TransactionId,
    output_index: OutputIndex,
}

impl Utxo {
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

impl Display for Utxo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.output_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256;
    use std::collections::HashSet;

    fn utxo(seed: u8, index: u32) -> Utxo {
        Utxo::new(
            TransactionId::new(Sha256::from_raw([seed; 32])),
            OutputIndex::new(index),
        )
    }

    #[test]
    fn equality_uses_both_fields() {
        let mut set = HashSet::new();
        set.insert(utxo(1, 0));
        assert!(set.contains(&utxo(1, 0)));
        assert!(!set.contains(&utxo(1, 1)));
        assert!(!set.contains(&utxo(2, 0)));
    }

    #[test]
    fn orders_by_transaction_then_index() {
        let mut utxos = vec![utxo(2, 0), utxo(1, 5), utxo(1, 2)];
        utxos.sort();
        assert_eq!(utxos, vec![utxo(1, 2), utxo(1, 5), utxo(2, 0)]);
    }

    #[test]
    fn displays_as_txid_colon_index() {
        assert_eq!(utxo(0, 7).to_string(), format!("{}:7", "00".repeat(32)));
    }
}
