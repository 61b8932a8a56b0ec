pub mod policy;
pub mod role_set;

pub use policy::{AccessPolicy, Operation, Route};
pub use role_set::RoleSet;
