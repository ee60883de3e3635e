use serde::{Deserialize, Serialize};

/// Claims carried inside a bearer token issued by the credential service.
///
/// `sub` always equals `user_id`; it is kept as a separate field because it
/// is the registered-claim name other JWT tooling expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub user_id: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(user_id: String, email: String, iat: i64, exp: i64) -> Self {
        Self {
            sub: user_id.clone(),
            user_id,
            email,
            iat,
            exp,
        }
    }
}
