use crate::{verify_signature, Amount, Transaction, TransactionOutput, Utxo, UtxoPool};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The checks a transaction must pass, in the order they run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ValidityCheck {
    InputsInPool,
    SignaturesValid,
    NoDuplicateClaims,
    OutputsNonNegative,
    ValueConserved,
}

impl Display for ValidityCheck {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValidityCheck::InputsInPool => "inputs-in-pool",
            ValidityCheck::SignaturesValid => "signatures-valid",
            ValidityCheck::NoDuplicateClaims => "no-duplicate-claims",
            ValidityCheck::OutputsNonNegative => "outputs-non-negative",
            ValidityCheck::ValueConserved => "value-conserved",
        };
        write!(f, "{}", name)
    }
}

/// Why a transaction was rejected.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("input claims output {0} which is not in the unspent pool")]
    MissingUtxo(Utxo),

    #[error("input {input_index} has a missing or invalid signature")]
    InvalidSignature { input_index: usize },

    #[error("output {0} is claimed more than once")]
    DuplicateClaim(Utxo),

    #[error("output {output_index} has negative amount {amount}")]
    NegativeOutput { output_index: usize, amount: Amount },

    // Covers both insufficient funds and a negative fee; they are the same condition.
    #[error("inputs total {input_total} is less than outputs total {output_total}")]
    InsufficientInputValue {
        input_total: Amount,
        output_total: Amount,
    },

    #[error("input or output total overflows")]
    ValueOverflow,
}

impl ValidationError {
    /// The check that produced this error.
    pub fn check(&self) -> ValidityCheck {
        match self {
            ValidationError::MissingUtxo(_) => ValidityCheck::InputsInPool,
            ValidationError::InvalidSignature { .. } => ValidityCheck::SignaturesValid,
            ValidationError::DuplicateClaim(_) => ValidityCheck::NoDuplicateClaims,
            ValidationError::NegativeOutput { .. } => ValidityCheck::OutputsNonNegative,
            ValidationError::InsufficientInputValue { .. } | ValidationError::ValueOverflow => {
                ValidityCheck::ValueConserved
            }
        }
    }
}

// Responsible for checking a transaction against the pool of unspent outputs.
// Validation is a pure function of the transaction and the pool; it never mutates either.
pub struct TransactionValidator {}

impl TransactionValidator {
    /// Runs every check in order and returns the first failure.
    /// Later checks rely on earlier ones, e.g. signatures are verified against the owner of
    /// the claimed output, which must therefore exist in the pool.
    pub fn validate(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<(), ValidationError> {
        Self::validate_inputs_in_pool(transaction, utxo_pool)?;
        Self::validate_signatures(transaction, utxo_pool)?;
        Self::validate_no_duplicate_claims(transaction)?;
        Self::validate_outputs_non_negative(transaction)?;
        Self::validate_value_conserved(transaction, utxo_pool)
    }

    /// Returns the difference between the input and the output totals, or None if an input
    /// isn't in the pool or a total overflows. A negative fee means the transaction spends
    /// more than it claims.
    pub fn transaction_fee(transaction: &Transaction, utxo_pool: &UtxoPool) -> Option<Amount> {
        let input_total = Self::input_total(transaction, utxo_pool).ok()?;
        let output_total = Self::output_total(transaction)?;
        input_total.checked_sub(output_total)
    }

    fn validate_inputs_in_pool(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<(), ValidationError> {
        match transaction
            .inputs()
            .iter()
            .map(|input| input.utxo())
            .find(|utxo| !utxo_pool.contains(utxo))
        {
            Some(missing) => Err(ValidationError::MissingUtxo(missing)),
            None => Ok(()),
        }
    }

    fn validate_signatures(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<(), ValidationError> {
        for (input_index, input) in transaction.inputs().iter().enumerate() {
            let owner = utxo_pool
                .get(&input.utxo())
                .map(TransactionOutput::owner)
                .ok_or(ValidationError::MissingUtxo(input.utxo()))?;
            let valid = match (transaction.raw_data_to_sign(input_index), input.signature()) {
                (Some(message), Some(signature)) => verify_signature(owner, &message, signature),
                _ => false,
            };
            if !valid {
                return Err(ValidationError::InvalidSignature { input_index });
            }
        }
        Ok(())
    }

    fn validate_no_duplicate_claims(transaction: &Transaction) -> Result<(), ValidationError> {
        let mut claimed = HashSet::with_capacity(transaction.inputs().len());
        for input in transaction.inputs() {
            if !claimed.insert(input.utxo()) {
                return Err(ValidationError::DuplicateClaim(input.utxo()));
            }
        }
        Ok(())
    }

    fn validate_outputs_non_negative(transaction: &Transaction) -> Result<(), ValidationError> {
        match transaction
            .outputs()
            .iter()
            .enumerate()
            .find(|(_, output)| output.amount().is_negative())
        {
            Some((output_index, output)) => Err(ValidationError::NegativeOutput {
                output_index,
                amount: output.amount(),
            }),
            None => Ok(()),
        }
    }

    fn validate_value_conserved(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<(), ValidationError> {
        let input_total = Self::input_total(transaction, utxo_pool)?;
        let output_total = Self::output_total(transaction).ok_or(ValidationError::ValueOverflow)?;
        if input_total >= output_total {
            Ok(())
        } else {
            Err(ValidationError::InsufficientInputValue {
                input_total,
                output_total,
            })
        }
    }

    fn input_total(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<Amount, ValidationError> {
        let amounts = transaction
            .inputs()
            .iter()
            .map(|input| {
                utxo_pool
                    .get(&input.utxo())
                    .map(TransactionOutput::amount)
                    .ok_or(ValidationError::MissingUtxo(input.utxo()))
            })
            .collect::<Result<Vec<Amount>, ValidationError>>()?;
        Amount::checked_sum(amounts).ok_or(ValidationError::ValueOverflow)
    }

    fn output_total(transaction: &Transaction) -> Option<Amount> {
        Amount::checked_sum(transaction.outputs().iter().map(TransactionOutput::amount))
    }
}
