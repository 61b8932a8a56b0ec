// src/presentation/http/middleware/mod.rs
pub mod require_route;

pub use require_route::{guarded, require_route};
