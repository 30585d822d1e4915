//! Wire (HTTP + JSON) representation of ledger records. Byte fields travel as hex.

use crate::errors::CoreError;
use crate::transaction::Transaction;
use crate::types::{Address, Amount, CurrencyId, IndexId};
use serde::{Deserialize, Serialize};

/// Serde adapter for byte vectors carried as hex strings.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex::decode(hex_str.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

/// A transaction record exactly as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransaction {
    pub source: String,
    pub dest: String,
    pub currency_id: String,
    pub amount: Amount,
    pub fee_amount: Amount,
    pub input_data: String,
    pub public_key: String,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_id: Option<IndexId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Body of `POST /contract`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDeployment {
    pub sender: String,
    pub script: String,
    pub public_key: String,
    pub signature: String,
    pub deploy_transaction: WireTransaction,
}

impl From<&Transaction> for WireTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            source: tx.source.to_hex(),
            dest: tx.dest.to_hex(),
            currency_id: tx.currency_id.to_hex(),
            amount: tx.amount,
            fee_amount: tx.fee_amount,
            input_data: hex::encode(&tx.input_data),
            public_key: hex::encode(&tx.public_key),
            signature: hex::encode(&tx.signature),
            index_id: tx.index_id,
            timestamp: tx.timestamp,
        }
    }
}

impl TryFrom<WireTransaction> for Transaction {
    type Error = CoreError;

    fn try_from(record: WireTransaction) -> Result<Self, Self::Error> {
        Ok(Transaction {
            source: decode_id::<Address>("source", &record.source)?,
            dest: decode_id::<Address>("dest", &record.dest)?,
            currency_id: decode_id::<CurrencyId>("currencyId", &record.currency_id)?,
            amount: record.amount,
            fee_amount: record.fee_amount,
            input_data: decode_bytes("inputData", &record.input_data)?,
            public_key: decode_bytes("publicKey", &record.public_key)?,
            signature: decode_bytes("signature", &record.signature)?,
            index_id: record.index_id,
            timestamp: record.timestamp,
        })
    }
}

impl Transaction {
    /// Converts to the wire record.
    pub fn to_wire(&self) -> WireTransaction {
        WireTransaction::from(self)
    }

    /// Decodes a wire record. Fails with [`CoreError::Decode`] on bad hex or id length.
    pub fn from_wire(record: WireTransaction) -> Result<Self, CoreError> {
        Transaction::try_from(record)
    }

    /// Decodes a wire record from a JSON value, reporting missing fields as decode errors.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let record: WireTransaction = serde_json::from_value(value)?;
        Self::from_wire(record)
    }
}

fn decode_bytes(field: &str, hex_str: &str) -> Result<Vec<u8>, CoreError> {
    hex::decode(hex_str.trim_start_matches("0x"))
        .map_err(|e| CoreError::Decode(format!("{}: invalid hex: {}", field, e)))
}

fn decode_id<T>(field: &str, hex_str: &str) -> Result<T, CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    hex_str.parse::<T>().map_err(|e| match e {
        CoreError::Decode(msg) | CoreError::Validation(msg) => {
            CoreError::Decode(format!("{}: {}", field, msg))
        }
        other => other,
    })
}
