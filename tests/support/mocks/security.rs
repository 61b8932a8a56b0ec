// tests/support/mocks/security.rs
use async_trait::async_trait;
use hospital_core::application::{
    ApplicationResult, error::ApplicationError, ports::security::PasswordHasher,
};

/// Ed25519 root key used by every test token manager.
pub const SIGNING_KEY: &str = "3b2c1f1d2e4a5b6c7d8e9f00112233445566778899aabbccddeeff0011223344";

/// Password given to every seeded account.
pub const PASSWORD: &str = "correct-horse-battery";

/// Reversible stand-in for argon2 so tests stay fast.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPasswordHasher;

impl StrictPasswordHasher {
    pub fn encode(password: &str) -> String {
        format!("plain${password}")
    }
}

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(Self::encode(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if Self::encode(password) == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("password mismatch"))
        }
    }
}
