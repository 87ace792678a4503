use rand::rngs::OsRng;
use rand::RngCore;

use crate::{SignError, SignResult};

/// Length of a generated `oauth_nonce`.
pub const NONCE_LENGTH: usize = 32;

const NONCE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

// largest multiple of 62 that fits in a byte; bytes at or above it are rejected
const REJECTION_BOUND: u8 = 248;

/// Generate a fresh alphanumeric `oauth_nonce`.
///
/// Every character is drawn uniformly from `A-Z a-z 0-9` with the operating
/// system CSPRNG. Fails with [`SignError::EntropyUnavailable`] if the OS
/// source cannot supply bytes.
pub fn generate_nonce() -> SignResult<String> {
    let mut nonce = String::with_capacity(NONCE_LENGTH);
    let mut buf = [0u8; NONCE_LENGTH * 2];
    while nonce.len() < NONCE_LENGTH {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| SignError::EntropyUnavailable(e.to_string()))?;
        for byte in buf.iter().filter(|b| **b < REJECTION_BOUND) {
            if nonce.len() == NONCE_LENGTH {
                break;
            }
            nonce.push(NONCE_ALPHABET[(*byte % 62) as usize] as char);
        }
    }
    Ok(nonce)
}
