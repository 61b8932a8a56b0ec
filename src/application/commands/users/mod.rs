mod bootstrap;
mod login;
mod password;
mod register;
mod service;
mod update;

pub use bootstrap::{BootstrapAdminCommand, BootstrapOutcome};
pub use login::LoginUserCommand;
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
pub use update::UpdateUserCommand;

/// Audit resource name for account administration.
pub(crate) const USERS_RESOURCE: &str = "users";
