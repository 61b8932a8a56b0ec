// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit;
pub mod health;
pub mod records;
pub mod security;
pub mod time;
pub mod users;

pub use audit::{FailingAuditRepo, InMemoryAuditRepo};
pub use health::StaticReadiness;
pub use records::InMemoryRecords;
pub use security::{PASSWORD, SIGNING_KEY, StrictPasswordHasher};
pub use time::{FixedClock, fixed_now};
pub use users::InMemoryUserRepo;
