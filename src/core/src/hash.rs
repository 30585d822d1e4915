//! Hash helpers shared by the codec, the wallet and contract scripts.

use sha2::Sha256;
use sha3::{Digest, Sha3_256, Sha3_512};

/// Computes the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let result = Sha256::digest(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Computes the SHA3-256 digest of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let result = Sha3_256::digest(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Computes the SHA3-512 digest of `data`.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let result = Sha3_512::digest(data);
    let mut hash = [0u8; 64];
    hash.copy_from_slice(&result);
    hash
}
