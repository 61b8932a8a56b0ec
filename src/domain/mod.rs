pub mod access;
pub mod audit;
pub mod errors;
pub mod records;
pub mod user;
