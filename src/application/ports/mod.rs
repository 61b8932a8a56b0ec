// src/application/ports/mod.rs
pub mod health;
pub mod security;
pub mod time;

pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type TokenManagerPort = dyn security::TokenManager;
pub type ClockPort = dyn time::Clock;
pub type ReadinessCheckPort = dyn health::ReadinessCheck;
