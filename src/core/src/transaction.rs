//! Transaction construction, canonical encoding and signing.

use crate::errors::CoreError;
use crate::types::{Address, Amount, CurrencyId, IndexId, ID_LENGTH};
use crate::wallet::{verify_signature, TransactionSigner};
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Length of the fixed-width prefix of the canonical encoding.
pub const CANONICAL_HEADER_LENGTH: usize = ID_LENGTH * 3 + 8 * 2;

/// A transfer that has been built but not signed yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// The sender's address
    pub source: Address,
    /// The recipient's address
    pub dest: Address,
    /// The currency being moved
    pub currency_id: CurrencyId,
    /// The amount to transfer
    pub amount: Amount,
    /// The fee paid to the network
    pub fee_amount: Amount,
    /// Opaque payload: a contract address for deployments, call data for contract calls
    pub input_data: Vec<u8>,
}

impl UnsignedTransaction {
    /// Creates an unsigned transaction from already validated parts.
    pub fn new(
        source: Address,
        dest: Address,
        currency_id: CurrencyId,
        amount: Amount,
        fee_amount: Amount,
        input_data: Vec<u8>,
    ) -> Self {
        Self {
            source,
            dest,
            currency_id,
            amount,
            fee_amount,
            input_data,
        }
    }

    /// Creates an unsigned transaction from raw byte fields.
    ///
    /// Fails with [`CoreError::Validation`] unless every identifier is exactly 16 bytes.
    pub fn build(
        source: &[u8],
        dest: &[u8],
        currency_id: &[u8],
        amount: Amount,
        fee_amount: Amount,
        input_data: &[u8],
    ) -> Result<Self, CoreError> {
        Ok(Self::new(
            Address::from_slice(source)?,
            Address::from_slice(dest)?,
            CurrencyId::from_slice(currency_id)?,
            amount,
            fee_amount,
            input_data.to_vec(),
        ))
    }

    /// The exact bytes handed to the signer:
    /// `source ‖ dest ‖ currencyId ‖ amount (u64 BE) ‖ feeAmount (u64 BE) ‖ inputData`.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(CANONICAL_HEADER_LENGTH + self.input_data.len());
        bytes.extend_from_slice(self.source.as_bytes());
        bytes.extend_from_slice(self.dest.as_bytes());
        bytes.extend_from_slice(self.currency_id.as_bytes());

        let mut amount_bytes = [0u8; 8];
        BigEndian::write_u64(&mut amount_bytes, self.amount);
        bytes.extend_from_slice(&amount_bytes);

        let mut fee_bytes = [0u8; 8];
        BigEndian::write_u64(&mut fee_bytes, self.fee_amount);
        bytes.extend_from_slice(&fee_bytes);

        bytes.extend_from_slice(&self.input_data);
        bytes
    }

    /// Signs the canonical encoding and attaches the signer's public key.
    pub fn sign<S: TransactionSigner + ?Sized>(self, signer: &S) -> Result<Transaction, CoreError> {
        if signer.address() != self.source {
            return Err(CoreError::Validation(format!(
                "signer address {} does not match transaction source {}",
                signer.address(),
                self.source
            )));
        }
        let signature = signer.sign(&self.canonical_bytes())?;

        Ok(Transaction {
            source: self.source,
            dest: self.dest,
            currency_id: self.currency_id,
            amount: self.amount,
            fee_amount: self.fee_amount,
            input_data: self.input_data,
            public_key: signer.public_key(),
            signature,
            index_id: None,
            timestamp: None,
        })
    }
}

/// A signed transaction, either local or as finalized by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// The sender's address
    pub source: Address,
    /// The recipient's address
    pub dest: Address,
    /// The currency being moved
    pub currency_id: CurrencyId,
    /// The amount transferred
    pub amount: Amount,
    /// The fee paid to the network
    pub fee_amount: Amount,
    /// Opaque payload
    pub input_data: Vec<u8>,
    /// Public key of the signer (empty for server-originated transfers)
    pub public_key: Vec<u8>,
    /// Signature over the canonical encoding
    pub signature: Vec<u8>,
    /// Position in the ledger log, assigned by the server
    pub index_id: Option<IndexId>,
    /// Acceptance time, assigned by the server
    pub timestamp: Option<u64>,
}

impl Transaction {
    /// The unsigned part of the transaction.
    pub fn unsigned(&self) -> UnsignedTransaction {
        UnsignedTransaction::new(
            self.source,
            self.dest,
            self.currency_id,
            self.amount,
            self.fee_amount,
            self.input_data.clone(),
        )
    }

    /// The canonical encoding the signature covers.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        self.unsigned().canonical_bytes()
    }

    /// Checks the signature against the declared public key.
    pub fn verify(&self) -> Result<(), CoreError> {
        verify_signature(&self.public_key, &self.canonical_bytes(), &self.signature)
    }

    /// Whether the server has finalized this transaction.
    pub fn is_finalized(&self) -> bool {
        self.index_id.is_some()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index_id {
            Some(index_id) => write!(f, "#{} ", index_id)?,
            None => write!(f, "#pending ")?,
        }
        write!(
            f,
            "{} -> {} amount: {} fee: {} currency: {}",
            self.source, self.dest, self.amount, self.fee_amount, self.currency_id
        )?;
        if !self.input_data.is_empty() {
            write!(f, " data: {}", hex::encode(&self.input_data))?;
        }
        Ok(())
    }
}
