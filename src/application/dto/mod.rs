pub mod audit;
pub mod auth;
pub mod records;
pub mod serde_time;
pub mod users;

pub use audit::AuditLogDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenClaims, TokenResponse, TokenSubject};
pub use records::{
    AdmissionDto, AppointmentDto, DeletedDto, DoctorDto, InvoiceDto, PatientDto, PrescriptionDto,
};
pub use users::UserDto;
