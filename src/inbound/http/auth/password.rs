use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use secrecy::{ExposeSecret, Secret};

/// Verified in place of the real hash when the username is unknown, so both
/// paths spend the same time hashing.
pub(crate) const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
    gZiV/M1gPc22ElAH/Jh1Hw$\
    CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

#[derive(thiserror::Error, Debug)]
pub enum PasswordError {
    #[error("Invalid password")]
    Mismatch,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Hashes `password` into a PHC string with argon2id.
pub fn compute_password_hash(password: Secret<String>) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {e}"))?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?
        .to_string();
    Ok(Secret::new(password_hash))
}

/// CPU bound: call it through `spawn_blocking_with_tracing`.
pub fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), PasswordError> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .map_err(|e| anyhow::anyhow!("Failed to parse hash in PHC string format: {e}"))?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .map_err(|_| PasswordError::Mismatch)
}
