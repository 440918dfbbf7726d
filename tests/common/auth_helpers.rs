//! Authentication test helpers
//!
//! Tokens are minted with the same HS256 secret the test server verifies
//! with, standing in for the external identity provider.

use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use bookclub::backend::auth::sessions::Claims;

/// Secret shared by the test server and [`mint_token`]
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// A signed-in test user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Mint a token for identity-provider subject `sub`
pub fn mint_token(sub: &str, name: &str, secret: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: format!("{}@example.com", sub),
        name: name.to_string(),
        picture: None,
        exp: (now + ttl_secs) as u64,
        iat: now as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to mint test token")
}

/// Token valid for an hour, signed with [`TEST_JWT_SECRET`]
pub fn test_token(sub: &str) -> String {
    mint_token(sub, sub, TEST_JWT_SECRET, 3600)
}
