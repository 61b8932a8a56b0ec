pub mod audit;
pub mod commands;
pub mod dto;
pub mod error;
pub mod gate;
pub mod ports;
pub mod queries;
pub mod records;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
