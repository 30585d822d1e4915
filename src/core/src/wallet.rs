//! Wallets and the signing capability used by the transaction codec.

use crate::errors::CoreError;
use crate::hash::{sha256, sha3_256};
use crate::types::{Address, ID_LENGTH};
use bip32::{DerivationPath, Mnemonic, XPrv};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signature, Signer, Verifier};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

/// Length of an ed25519 private key seed.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of an ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Anything able to sign payloads on behalf of an address.
pub trait TransactionSigner {
    /// The address the signatures are attributed to.
    fn address(&self) -> Address;

    /// The public key a verifier checks signatures against.
    fn public_key(&self) -> Vec<u8>;

    /// Signs an arbitrary byte payload.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CoreError>;
}

/// An ed25519 wallet. The private key never leaves the value.
pub struct Wallet {
    secret: [u8; PRIVATE_KEY_LENGTH],
    public: PublicKey,
}

impl Wallet {
    /// Generates a wallet with a fresh random private key.
    pub fn generate() -> Result<Self, CoreError> {
        let mut seed = [0u8; PRIVATE_KEY_LENGTH];
        OsRng.fill_bytes(&mut seed);
        Self::from_private_key(&seed)
    }

    /// Restores a wallet from raw private key bytes.
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(CoreError::Key(format!(
                "Private key must be {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let secret_key = SecretKey::from_bytes(bytes)?;
        let public = PublicKey::from(&secret_key);

        let mut secret = [0u8; PRIVATE_KEY_LENGTH];
        secret.copy_from_slice(bytes);
        Ok(Self { secret, public })
    }

    /// Restores a wallet from a hex encoded private key.
    pub fn from_private_hex(hex_str: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(hex_str.trim().trim_start_matches("0x"))
            .map_err(|e| CoreError::Key(format!("Invalid private key hex: {}", e)))?;
        Self::from_private_key(&bytes)
    }

    /// Derives the wallet for `account_index` from a BIP-39 mnemonic.
    pub fn from_mnemonic(phrase: &str, account_index: u32) -> Result<Self, CoreError> {
        let mnemonic = Mnemonic::new(phrase, Default::default())?;
        let seed = mnemonic.to_seed("");

        let path: DerivationPath = format!("m/44'/0'/{}'", account_index).parse()?;
        let root = XPrv::derive_from_path(seed, &path)?;

        // The BIP-32 key is secp256k1 material; hash it into an ed25519 seed.
        Self::from_private_key(&sha256(&root.to_bytes()))
    }

    /// Generates a new random BIP-39 mnemonic phrase.
    pub fn random_mnemonic() -> String {
        Mnemonic::random(OsRng, Default::default()).phrase().to_string()
    }

    /// The address derived from the public key: the first 16 bytes of its SHA3-256 digest.
    pub fn address(&self) -> Address {
        address_from_public_key(self.public.as_bytes())
    }

    /// The raw public key bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.public.to_bytes()
    }

    /// The private key as hex, for export.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret)
    }

    fn keypair(&self) -> Result<Keypair, CoreError> {
        Ok(Keypair {
            secret: SecretKey::from_bytes(&self.secret)?,
            public: self.public,
        })
    }
}

impl TransactionSigner for Wallet {
    fn address(&self) -> Address {
        Wallet::address(self)
    }

    fn public_key(&self) -> Vec<u8> {
        self.public.to_bytes().to_vec()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CoreError> {
        let keypair = self.keypair()?;
        let signature: Signature = keypair.sign(message);
        Ok(signature.to_bytes().to_vec())
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("public_key", &hex::encode(self.public.as_bytes()))
            .finish()
    }
}

/// Derives the 16-byte address owned by a public key.
pub fn address_from_public_key(public_key: &[u8]) -> Address {
    let digest = sha3_256(public_key);
    let mut address = [0u8; ID_LENGTH];
    address.copy_from_slice(&digest[..ID_LENGTH]);
    Address(address)
}

/// Verifies an ed25519 signature over `message`.
pub fn verify_signature(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<(), CoreError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(CoreError::Signature(format!(
            "Signature must be exactly {} bytes, got {}",
            SIGNATURE_LENGTH,
            signature.len()
        )));
    }
    let public_key = PublicKey::from_bytes(public_key)?;
    let signature = Signature::try_from(signature)?;
    public_key.verify(message, &signature)?;
    Ok(())
}
