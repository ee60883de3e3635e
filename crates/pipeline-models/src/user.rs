use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account in the credential service's user store.
///
/// `password_hash` is never empty and is never serialized back to a client;
/// callers that need a public view should go through [`User::public_summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user around an already-hashed password. Hashing itself is
    /// the caller's responsibility (see `credential-service`'s password module)
    /// so this crate never depends on a KDF.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn public_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// What a client is allowed to see about a user: no password hash, ever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_summary_never_carries_the_password_hash() {
        let user = User::new("a@b.c".to_string(), "$argon2id$...".to_string(), "Ada".to_string());
        let summary = user.public_summary();
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.email, "a@b.c");
        let serialized = serde_json::to_string(&summary).unwrap();
        assert!(!serialized.contains("argon2"));
    }

    #[test]
    fn serializing_a_user_directly_still_skips_the_hash() {
        let user = User::new("a@b.c".to_string(), "secret-hash".to_string(), "Ada".to_string());
        let serialized = serde_json::to_string(&user).unwrap();
        assert!(!serialized.contains("secret-hash"));
    }
}
