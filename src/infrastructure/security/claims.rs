// src/infrastructure/security/claims.rs
use crate::application::{
    dto::TokenClaims,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::Role;
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, TimeZone, Utc};

/// Collect the claim facts of a verified token. Unknown facts are ignored;
/// a missing or malformed claim rejects the token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<TokenClaims> {
    let mut username = None;
    let mut role = None;
    let mut issued_at = None;
    let mut expires_at = None;

    for fact in facts {
        let Predicate { name, terms } = fact.predicate;
        match (name.as_str(), terms.as_slice()) {
            ("user", [Term::Str(name)]) => username = Some(name.clone()),
            ("role", [Term::Str(value)]) => {
                role = Some(value.parse::<Role>().map_err(|_| {
                    ApplicationError::unauthorized(format!("unknown role claim '{value}'"))
                })?);
            }
            ("issued_at", [Term::Date(secs)]) => issued_at = Some(date(*secs)?),
            ("expires_at", [Term::Date(secs)]) => expires_at = Some(date(*secs)?),
            _ => {}
        }
    }

    Ok(TokenClaims {
        username: username.ok_or_else(|| ApplicationError::unauthorized("missing user claim"))?,
        role: role.ok_or_else(|| ApplicationError::unauthorized("missing role claim"))?,
        issued_at: issued_at
            .ok_or_else(|| ApplicationError::unauthorized("missing issued_at claim"))?,
        expires_at: expires_at
            .ok_or_else(|| ApplicationError::unauthorized("missing expires_at claim"))?,
    })
}

fn date(secs: u64) -> ApplicationResult<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(|| ApplicationError::unauthorized("claim timestamp out of range"))
}
