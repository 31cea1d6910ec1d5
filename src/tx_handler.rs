use crate::{
    Amount, OutputIndex, Transaction, TransactionId, TransactionValidator, Utxo, UtxoPool,
    ValidationError,
};
use tracing::{debug, info, trace};

/// A candidate transaction that was left out of an epoch, and why.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rejection {
    pub transaction_id: TransactionId,
    pub reason: ValidationError,
}

/// The outcome of processing one batch of candidate transactions.
#[derive(Debug, Clone, Default)]
pub struct EpochReport {
    /// Accepted transactions, in the order they were accepted.
    pub accepted: Vec<Transaction>,
    /// Rejected candidates, in the order they were considered.
    pub rejected: Vec<Rejection>,
    /// Sum of the fees paid by the accepted transactions.
    pub total_fees: Amount,
}

/// Maintains the public ledger of unspent outputs and advances it one batch of transactions
/// at a time.
///
/// The handler owns its pool exclusively. The outcome of a batch depends on the order of the
/// candidates: each one is validated against the pool as left by the candidates accepted
/// before it, so when two candidates spend the same output, the first one wins.
pub struct TxHandler {
    utxo_pool: UtxoPool,
}

impl TxHandler {
    /// Creates a handler whose ledger is a copy of the given pool.
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self {
            utxo_pool: utxo_pool.clone(),
        }
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn into_utxo_pool(self) -> UtxoPool {
        self.utxo_pool
    }

    /// Returns true iff the transaction is valid against the current ledger.
    pub fn is_valid_tx(&self, transaction: &Transaction) -> bool {
        self.validate_tx(transaction).is_ok()
    }

    pub fn validate_tx(&self, transaction: &Transaction) -> Result<(), ValidationError> {
        TransactionValidator::validate(transaction, &self.utxo_pool)
    }

    /// Processes one epoch: accepts every candidate that is valid at the time it's considered,
    /// updates the ledger, and returns the accepted transactions in acceptance order.
    pub fn handle_txs(&mut self, possible_txs: &[Transaction]) -> Vec<Transaction> {
        self.handle_txs_with_report(possible_txs).accepted
    }

    /// Same as `handle_txs`, but also reports the rejected candidates and the collected fees.
    pub fn handle_txs_with_report(&mut self, possible_txs: &[Transaction]) -> EpochReport {
        let mut report = EpochReport::default();
        for transaction in possible_txs {
            match self.validate_tx(transaction) {
                Ok(()) => {
                    // The fee must be read before the inputs leave the pool.
                    let fee = TransactionValidator::transaction_fee(transaction, &self.utxo_pool)
                        .unwrap_or_else(Amount::zero);
                    match report.total_fees.checked_add(fee) {
                        Some(total_fees) => report.total_fees = total_fees,
                        None => debug!("Fee total overflowed at transaction: {}", transaction.id()),
                    }
                    self.apply_transaction(transaction);
                    trace!("Accepted transaction: {}", transaction.id());
                    report.accepted.push(transaction.clone());
                }
                Err(reason) => {
                    debug!(
                        "Rejected transaction: {} failed check {}: {}",
                        transaction.id(),
                        reason.check(),
                        reason
                    );
                    report.rejected.push(Rejection {
                        transaction_id: *transaction.id(),
                        reason,
                    });
                }
            }
        }
        info!(
            "Epoch processed: {} accepted, {} rejected, {} in fees, {} unspent outputs",
            report.accepted.len(),
            report.rejected.len(),
            report.total_fees,
            self.utxo_pool.len()
        );
        report
    }

    /// Spends the transaction's inputs and adds its outputs to the ledger.
    /// Called only for transactions that have just passed validation.
    fn apply_transaction(&mut self, transaction: &Transaction) {
        for input in transaction.inputs() {
            self.utxo_pool.remove_utxo(&input.utxo());
        }
        for (index, output) in transaction.outputs().iter().enumerate() {
            let utxo = Utxo::new(*transaction.id(), OutputIndex::new(index as u32));
            self.utxo_pool.add_utxo(utxo, output.clone());
        }
    }
}
