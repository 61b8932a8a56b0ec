use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_USER_ROLE: &str = "users_role_check";

/// Foreign keys named `<table>_<column>_fkey` map to "<thing> not found".
fn missing_reference(constraint: &str) -> Option<&'static str> {
    let column = constraint.strip_suffix("_fkey")?;
    [
        ("patient_id", "patient not found"),
        ("doctor_id", "doctor not found"),
        ("appointment_id", "appointment not found"),
        ("admission_id", "admission not found"),
    ]
    .into_iter()
    .find(|(suffix, _)| column.ends_with(suffix))
    .map(|(_, message)| message)
}

/// Postgres reports a row that other rows still point at as
/// "update or delete on table ..."; bad inserts read "insert or update ...".
fn is_delete_violation(message: &str) -> bool {
    message.starts_with("update or delete")
}

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                match constraint {
                    CNT_USER_USERNAME => {
                        return DomainError::Conflict("username already registered".into());
                    }
                    CNT_USER_EMAIL => {
                        return DomainError::Conflict("email already registered".into());
                    }
                    CNT_USER_ROLE => return DomainError::Validation("unknown role".into()),
                    other => {
                        if let Some(message) = missing_reference(other) {
                            if db_err.code().as_deref() == Some("23503")
                                && !is_delete_violation(db_err.message())
                            {
                                return DomainError::NotFound(message.into());
                            }
                        }
                    }
                }
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" if is_delete_violation(db_err.message()) => {
                        return DomainError::Conflict(
                            "record is still referenced by other records".into(),
                        );
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Convert a stored integer key that the schema guarantees to be positive.
pub(super) fn stored_id(raw: i64) -> Result<crate::domain::records::RecordId, DomainError> {
    crate::domain::records::RecordId::new(raw)
        .map_err(|_| DomainError::Persistence(format!("invalid stored id {raw}")))
}

pub(super) fn stored_enum<T>(raw: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>()
        .map_err(|err| DomainError::Persistence(format!("corrupt stored value: {err}")))
}
