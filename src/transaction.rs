use crate::{Amount, PublicKey, Sha256, Signature, Utxo};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
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

/// The index of the transaction output.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
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

    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    // 32 bytes. A pointer to the transaction containing the UTXO to be spent.
    utxo_id: TransactionId,
    // 4 bytes. The number of UTXO to be spent, the first one is 0.
    output_index: OutputIndex,
    // Signature over `Transaction::raw_data_to_sign` for this input, made by the owner of the
    // referenced output. Missing until the input is signed.
    signature: Option<Signature>,
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.utxo_id, self.output_index)
    }
}

impl TransactionInput {
    pub fn new(utxo_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            utxo_id,
            output_index,
            signature: None,
        }
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }

    pub fn utxo_id(&self) -> &TransactionId {
        &self.utxo_id
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// The unspent output this input claims.
    pub fn utxo(&self) -> Utxo {
        Utxo::new(self.utxo_id, self.output_index)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    amount: Amount,
    owner: PublicKey,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.owner)
    }
}

impl TransactionOutput {
    pub fn new(amount: Amount, owner: PublicKey) -> Self {
        Self { amount, owner }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn owner(&self) -> &PublicKey {
        &self.owner
    }

    fn write_bytes(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.amount.value().to_be_bytes());
        buffer.extend_from_slice(self.owner.as_bytes());
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let mut transaction = Self {
            id: TransactionId::new(Sha256::from_raw([0; 32])),
            inputs,
            outputs,
        };
        transaction.finalize();
        transaction
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

    pub fn add_input(&mut self, utxo_id: TransactionId, output_index: OutputIndex) {
        self.inputs.push(TransactionInput::new(utxo_id, output_index));
    }

    pub fn remove_input(&mut self, index: usize) -> Option<TransactionInput> {
        if index < self.inputs.len() {
            Some(self.inputs.remove(index))
        } else {
            None
        }
    }

    pub fn add_output(&mut self, amount: Amount, owner: PublicKey) {
        self.outputs.push(TransactionOutput::new(amount, owner));
    }

    /// Attaches the signature to the input at the given index.
    /// The transaction id is stale afterwards, until `finalize` is called.
    pub fn add_signature(&mut self, index: usize, signature: Signature) -> Result<(), String> {
        let num_inputs = self.inputs.len();
        match self.inputs.get_mut(index) {
            Some(input) => {
                input.signature = Some(signature);
                Ok(())
            }
            None => Err(format!(
                "Transaction: {} has no input at index: {}, it has {} inputs.",
                self.id, index, num_inputs
            )),
        }
    }

    /// Recomputes the transaction id from the current inputs, signatures and outputs.
    pub fn finalize(&mut self) {
        self.id = TransactionId::new(Sha256::double_digest(&self.raw_tx()));
    }

    /// Returns the bytes that the owner of the output claimed by input `index` must sign.
    /// The message covers that input's reference and every output, but no signatures, so
    /// inputs can be signed independently. Returns None if there is no such input.
    pub fn raw_data_to_sign(&self, index: usize) -> Option<Vec<u8>> {
        let input = self.inputs.get(index)?;
        let mut data = vec![];
        data.extend_from_slice(input.utxo_id.as_slice());
        data.extend_from_slice(&input.output_index.value().to_be_bytes());
        for output in &self.outputs {
            output.write_bytes(&mut data);
        }
        Some(data)
    }

    /// Returns the bytes of the whole transaction, signatures included.
    pub fn raw_tx(&self) -> Vec<u8> {
        let mut data = vec![];
        for input in &self.inputs {
            data.extend_from_slice(input.utxo_id.as_slice());
            data.extend_from_slice(&input.output_index.value().to_be_bytes());
            if let Some(signature) = &input.signature {
                data.extend_from_slice(signature.as_slice());
            }
        }
        for output in &self.outputs {
            output.write_bytes(&mut data);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn owner(seed: u8) -> PublicKey {
        PublicKey::from(SigningKey::from_bytes(&[seed; 32]).verifying_key())
    }

    fn prev_id(seed: u8) -> TransactionId {
        TransactionId::new(Sha256::digest(&[seed]))
    }

    fn create_transaction() -> Transaction {
        Transaction::new(
            vec![
                TransactionInput::new(prev_id(1), OutputIndex::new(0)),
                TransactionInput::new(prev_id(2), OutputIndex::new(3)),
            ],
            vec![TransactionOutput::new(Amount::new(10), owner(9))],
        )
    }

    #[test]
    fn raw_data_to_sign_covers_one_input_and_all_outputs() {
        let transaction = create_transaction();
        let data = transaction.raw_data_to_sign(1).unwrap();

        let mut expected = prev_id(2).as_slice().to_vec();
        expected.extend_from_slice(&[0, 0, 0, 3]);
        expected.extend_from_slice(&10i64.to_be_bytes());
        expected.extend_from_slice(owner(9).as_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn raw_data_to_sign_ignores_signatures() {
        let mut transaction = create_transaction();
        let before = transaction.raw_data_to_sign(0).unwrap();
        let signature = SigningKey::from_bytes(&[1; 32]).sign(&before);
        transaction.add_signature(0, signature.into()).unwrap();
        assert_eq!(transaction.raw_data_to_sign(0).unwrap(), before);
    }

    #[test]
    fn raw_data_to_sign_out_of_range() {
        assert_eq!(create_transaction().raw_data_to_sign(2), None);
    }

    #[test]
    fn finalize_includes_signatures_in_id() {
        let mut transaction = create_transaction();
        let unsigned_id = *transaction.id();
        transaction
            .add_signature(0, Signature::new(vec![1, 2, 3]))
            .unwrap();
        assert_eq!(*transaction.id(), unsigned_id);
        transaction.finalize();
        assert_ne!(*transaction.id(), unsigned_id);
    }

    #[test]
    fn add_signature_out_of_range() {
        let mut transaction = create_transaction();
        let err = transaction
            .add_signature(5, Signature::new(vec![]))
            .unwrap_err();
        assert!(err.contains("no input at index: 5"), "{}", err);
    }

    #[test]
    fn builder_methods_change_id_after_finalize() {
        let mut transaction = create_transaction();
        let original_id = *transaction.id();
        transaction.add_output(Amount::new(1), owner(3));
        transaction.add_input(prev_id(4), OutputIndex::new(1));
        let removed = transaction.remove_input(0).unwrap();
        assert_eq!(removed.utxo(), Utxo::new(prev_id(1), OutputIndex::new(0)));
        assert_eq!(transaction.remove_input(7), None);

        transaction.finalize();
        assert_eq!(transaction.inputs().len(), 2);
        assert_eq!(transaction.outputs().len(), 2);
        assert_ne!(*transaction.id(), original_id);
    }

    #[test]
    fn identical_content_has_identical_id() {
        assert_eq!(create_transaction().id(), create_transaction().id());
    }
}
