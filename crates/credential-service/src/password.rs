//! Password hashing and verification.
//!
//! Hashing and verification are CPU-bound (Argon2 is deliberately slow) and
//! run on `spawn_blocking` so they never stall the async executor. Login
//! verifies against a fixed dummy hash when the looked-up user doesn't
//! exist, so the response time for "no such user" and "wrong password" is
//! indistinguishable — the spec's anti-enumeration requirement.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tokio::task::JoinHandle;
use tracing::Span;

/// A valid Argon2id PHC string whose cost parameters match [`Argon2::default`].
/// Verifying against it costs the same as a real lookup without ever
/// matching a real password.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1\
    $gZiV/M1gPc22ElAH/Jh1Hw\
    $CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let span = Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(f))
}

fn hash_sync(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| e.to_string())
}

fn verify_sync(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Hashes `password` on a blocking thread.
pub async fn hash_password(password: String) -> Result<String, String> {
    spawn_blocking_with_tracing(move || hash_sync(&password))
        .await
        .map_err(|e| format!("hashing task panicked: {e}"))?
}

/// Verifies `password` against `stored_hash` on a blocking thread.
pub async fn verify_password(password: String, stored_hash: String) -> bool {
    spawn_blocking_with_tracing(move || verify_sync(&password, &stored_hash))
        .await
        .unwrap_or(false)
}

/// Verifies `password` against the fixed dummy hash, for the "no such user"
/// branch of login — always does real Argon2 work, always returns `false`.
pub async fn verify_dummy(password: String) -> bool {
    verify_password(password, DUMMY_HASH.to_string()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hash = hash_password("correct horse battery staple".to_string()).await.unwrap();
        assert!(verify_password("correct horse battery staple".to_string(), hash.clone()).await);
        assert!(!verify_password("wrong password".to_string(), hash).await);
    }

    #[tokio::test]
    async fn dummy_hash_never_verifies() {
        assert!(!verify_dummy("anything at all".to_string()).await);
    }

    #[tokio::test]
    async fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password("whatever".to_string(), "not-a-phc-string".to_string()).await);
    }
}
