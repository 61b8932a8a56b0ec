// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, TokenClaims, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::{security::TokenManager, time::Clock},
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::{collections::HashMap, sync::Arc, time::SystemTime};

use super::claims::parse_claims;

const TOKEN_CODE: &str = r#"
    user({uname});
    role({urole});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
"#;

const VERIFIER_CODE: &str = r#"
    time({now});
    allow if user($name), role($role);
"#;

/// Ed25519-signed Biscuit access tokens. The key pair is loaded once at
/// startup and only read afterwards.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl BiscuitTokenManager {
    pub fn new(
        private_key_hex: &str,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> ApplicationResult<Self> {
        if ttl <= Duration::zero() {
            return Err(ApplicationError::infrastructure("token ttl must be positive"));
        }
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(format!("invalid signing key: {err}")))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
            clock,
        })
    }

    fn mint(&self, subject: &TokenSubject, issued_at: SystemTime, expires_at: SystemTime) -> ApplicationResult<String> {
        let mut params: HashMap<String, Term> = HashMap::new();
        params.insert("uname".to_string(), subject.username.clone().into());
        params.insert("urole".to_string(), subject.role.as_str().into());
        params.insert("issued".to_string(), issued_at.into());
        params.insert("exp".to_string(), expires_at.into());

        let token = Biscuit::builder()
            .code_with_params(TOKEN_CODE, params, HashMap::new())
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(self.root.as_ref())
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        token
            .seal()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .to_base64()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

/// Biscuit dates have second precision; keep the DTO in step with the token.
fn whole_seconds(at: DateTime<Utc>) -> ApplicationResult<DateTime<Utc>> {
    Utc.timestamp_opt(at.timestamp(), 0)
        .single()
        .ok_or_else(|| ApplicationError::infrastructure("timestamp out of range"))
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = whole_seconds(self.clock.now())?;
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let token = self.mint(
            &subject,
            SystemTime::from(issued_at),
            SystemTime::from(expires_at),
        )?;

        Ok(AuthTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<TokenClaims> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(format!("invalid token: {err}")))?;

        let now = whole_seconds(self.clock.now())?;
        let mut params: HashMap<String, Term> = HashMap::new();
        params.insert("now".to_string(), SystemTime::from(now).into());

        let mut authorizer = AuthorizerBuilder::new()
            .code_with_params(VERIFIER_CODE, params, HashMap::new())
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(format!("token rejected: {err}")))?;

        let (facts, _, _, _) = authorizer.dump();
        let claims = parse_claims(facts)?;

        if claims.expires_at <= now {
            return Err(ApplicationError::unauthorized("token expired"));
        }
        Ok(claims)
    }
}
