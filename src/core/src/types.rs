//! Core types for the Pigeonium ledger client.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of every address and currency identifier.
pub const ID_LENGTH: usize = 16;

/// Number of decimal places used when rendering amounts for humans.
pub const AMOUNT_DECIMALS: u32 = 6;

/// Token amount, expressed in the smallest unit of a currency.
pub type Amount = u64;

/// Server-assigned position of a transaction in the ledger log.
pub type IndexId = u64;

macro_rules! fixed_id {
    ($(#[$meta:meta])* $name:ident, $label:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub [u8; ID_LENGTH]);

        impl $name {
            /// The all-zero identifier.
            pub const ZERO: Self = Self([0u8; ID_LENGTH]);

            /// Creates an identifier from a byte slice, which must be exactly 16 bytes long.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
                let array: [u8; ID_LENGTH] = bytes.try_into().map_err(|_| {
                    CoreError::Validation(format!(
                        "{} must be {} bytes, got {}",
                        $label,
                        ID_LENGTH,
                        bytes.len()
                    ))
                })?;
                Ok(Self(array))
            }

            /// Parses an identifier from its hex form. A leading `0x` is accepted.
            pub fn from_hex(hex_str: &str) -> Result<Self, CoreError> {
                let bytes = hex::decode(hex_str.trim().trim_start_matches("0x"))?;
                Self::from_slice(&bytes).map_err(|e| match e {
                    CoreError::Validation(msg) => CoreError::Decode(msg),
                    other => other,
                })
            }

            /// Returns the raw bytes.
            pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
                &self.0
            }

            /// Returns the lowercase hex form without prefix.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl From<[u8; ID_LENGTH]> for $name {
            fn from(bytes: [u8; ID_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct IdVisitor;

                impl<'de> serde::de::Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        write!(formatter, "a hex encoded {}-byte {}", ID_LENGTH, $label)
                    }

                    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        $name::from_hex(v).map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(IdVisitor)
            }
        }
    };
}

fixed_id!(
    /// A 16-byte account or contract address.
    Address,
    "address"
);

fixed_id!(
    /// A 16-byte currency identifier.
    CurrencyId,
    "currency id"
);

/// A named, fixed-supply unit of account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// The currency identifier
    pub currency_id: CurrencyId,
    /// Human readable name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Address that created the currency
    pub issuer: Address,
    /// Total supply in the smallest unit
    pub supply: Amount,
}

/// Static parameters of the network a client is connected to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// Network name
    pub network_name: String,
    /// Network identifier
    pub network_id: u64,
    /// Cost, in base currency, of deploying a contract
    pub contract_deploy_cost: Amount,
    /// Public key of the network administrator
    #[serde(with = "crate::wire::hex_bytes")]
    pub admin_public_key: Vec<u8>,
    /// The currency used to pay deployment costs and fees
    pub base_currency: Currency,
}

/// Renders an amount with [`AMOUNT_DECIMALS`] decimal places.
pub fn format_amount(amount: Amount) -> String {
    let scale = 10u64.pow(AMOUNT_DECIMALS);
    format!(
        "{}.{:0width$}",
        amount / scale,
        amount % scale,
        width = AMOUNT_DECIMALS as usize
    )
}

/// Parses a user supplied amount in the smallest unit.
pub fn parse_amount(input: &str) -> Result<Amount, CoreError> {
    let trimmed = input.trim().replace('_', "");
    if trimmed.starts_with('-') {
        return Err(CoreError::Validation(format!(
            "amount must not be negative: {}",
            input
        )));
    }
    trimmed
        .parse::<Amount>()
        .map_err(|e| CoreError::Validation(format!("invalid amount '{}': {}", input, e)))
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) id: {}, issuer: {}, supply: {}",
            self.name,
            self.symbol,
            self.currency_id,
            self.issuer,
            format_amount(self.supply)
        )
    }
}

impl fmt::Display for NetworkInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (id: {}), deploy cost: {} {}",
            self.network_name,
            self.network_id,
            format_amount(self.contract_deploy_cost),
            self.base_currency.symbol
        )
    }
}
