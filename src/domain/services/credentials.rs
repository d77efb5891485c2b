//! Password credential derivation and verification.
//!
//! Each user stores a hash, a random salt and the iteration count the hash
//! was derived with, so the work factor can be raised later without
//! rehashing existing accounts on a flag day.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::error::AppError;

const SALT_LEN: usize = 16;
const OUTPUT_LEN: usize = 32;
// Fixed Argon2id cost parameters apart from t_cost, which is the
// policy-configurable per-user iteration count.
const MEMORY_KIB: u32 = 19_456;
const LANES: u32 = 1;

pub struct DerivedCredential {
    pub hash: String,
    pub salt: String,
    pub iterations: u32,
}

/// Derives a credential from a plaintext password with a fresh random salt.
/// `min_iterations` is the configured policy floor.
pub fn derive(password: &str, min_iterations: u32) -> Result<DerivedCredential, AppError> {
    let iterations = min_iterations.max(2);

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let hash = compute(password, &salt, iterations)?;

    Ok(DerivedCredential {
        hash: hex::encode(hash),
        salt: hex::encode(salt),
        iterations,
    })
}

/// Recomputes the hash for a candidate password and compares it to the
/// stored hash in constant time. A wrong password is `Ok(false)`; an error
/// means the stored salt, hash or iteration count is malformed.
pub fn verify(
    stored_hash: &str,
    candidate: &str,
    stored_salt: &str,
    stored_iterations: u32,
) -> Result<bool, AppError> {
    if stored_iterations == 0 {
        return Err(AppError::Validation("stored iteration count is invalid".into()));
    }

    let salt = hex::decode(stored_salt)
        .map_err(|_| AppError::Validation("stored salt is malformed".into()))?;
    let stored = hex::decode(stored_hash)
        .map_err(|_| AppError::Validation("stored hash is malformed".into()))?;

    let computed = compute(candidate, &salt, stored_iterations)?;

    Ok(bool::from(computed.as_slice().ct_eq(stored.as_slice())))
}

fn compute(password: &str, salt: &[u8], iterations: u32) -> Result<[u8; OUTPUT_LEN], AppError> {
    let params = Params::new(MEMORY_KIB, iterations, LANES, Some(OUTPUT_LEN))
        .map_err(|_| AppError::Validation("stored iteration count is invalid".into()))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = [0u8; OUTPUT_LEN];
    argon
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|_| AppError::Internal)?;

    Ok(out)
}
