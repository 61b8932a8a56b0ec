// src/presentation/http/controllers/mod.rs
pub mod admissions;
pub mod appointments;
pub mod audit;
pub mod auth;
pub mod doctors;
pub mod health;
pub mod invoices;
pub mod patients;
pub mod prescriptions;
