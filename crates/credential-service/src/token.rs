//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs. The signing algorithm is pinned explicitly on both
//! sides: `Header::new(Algorithm::HS256)` on issue, and
//! `Validation::new(Algorithm::HS256)` on verify. `jsonwebtoken` rejects a
//! token whose header advertises any other algorithm before it even
//! attempts to check the MAC — a token claiming RSA or "none" fails here,
//! which is the algorithm-confusion defense the spec calls for.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pipeline_models::TokenClaims;

pub struct IssuedToken {
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
}

pub fn issue(user_id: &str, email: &str, secret: &str, lifetime_hours: i64) -> Result<IssuedToken, String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(lifetime_hours);

    let claims = TokenClaims::new(user_id.to_string(), email.to_string(), now.timestamp(), expires_at.timestamp());

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())?;

    Ok(IssuedToken { token, expires_at })
}

/// Verifies `token`. Returns `None` on any failure mode — bad format, wrong
/// algorithm, bad signature, or expiry — per the spec's "valid=false, no
/// further detail" contract.
pub fn verify(token: &str, secret: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256];
    validation.validate_exp = true;

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issue_then_verify_round_trips() {
        let issued = issue("user-1", "a@b.c", SECRET, 24).unwrap();
        let claims = verify(&issued.token, SECRET).expect("token should verify");
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.email, "a@b.c");
    }

    #[test]
    fn wrong_secret_fails() {
        let issued = issue("user-1", "a@b.c", SECRET, 24).unwrap();
        assert!(verify(&issued.token, "a different secret").is_none());
    }

    #[test]
    fn expired_token_fails() {
        let issued = issue("user-1", "a@b.c", SECRET, -1).unwrap();
        assert!(verify(&issued.token, SECRET).is_none());
    }

    #[test]
    fn tampered_signature_fails() {
        let issued = issue("user-1", "a@b.c", SECRET, 24).unwrap();
        let mut tampered = issued.token.clone();
        tampered.pop();
        tampered.push(if issued.token.ends_with('a') { 'b' } else { 'a' });
        assert!(verify(&tampered, SECRET).is_none());
    }

    #[test]
    fn wrong_algorithm_family_is_rejected() {
        let claims = TokenClaims::new("user-1".to_string(), "a@b.c".to_string(), 0, i64::MAX);
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify(&token, SECRET).is_none());
    }
}
