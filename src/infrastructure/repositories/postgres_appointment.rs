use super::error::{map_sqlx, stored_enum, stored_id};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::records::{
    Appointment, AppointmentChanges, AppointmentRepository, NewAppointment, RecordId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "id, patient_id, doctor_id, scheduled_at, status, reason";

#[derive(Clone)]
pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    scheduled_at: DateTime<Utc>,
    status: String,
    reason: Option<String>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DomainError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: stored_id(row.id)?,
            patient_id: stored_id(row.patient_id)?,
            doctor_id: stored_id(row.doctor_id)?,
            scheduled_at: row.scheduled_at,
            status: stored_enum(&row.status)?,
            reason: row.reason,
        })
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    async fn insert(&self, appointment: NewAppointment) -> DomainResult<Appointment> {
        let sql = format!(
            "INSERT INTO appointments (patient_id, doctor_id, scheduled_at, status, reason)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(i64::from(appointment.patient_id))
            .bind(i64::from(appointment.doctor_id))
            .bind(appointment.scheduled_at)
            .bind(appointment.status.as_str())
            .bind(appointment.reason)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Appointment::try_from(row)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Appointment>> {
        let sql = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Appointment>> {
        let sql = format!("SELECT {COLUMNS} FROM appointments ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: RecordId,
        changes: AppointmentChanges,
    ) -> DomainResult<Option<Appointment>> {
        let sql = format!(
            "UPDATE appointments SET
                patient_id = COALESCE($2, patient_id),
                doctor_id = COALESCE($3, doctor_id),
                scheduled_at = COALESCE($4, scheduled_at),
                status = COALESCE($5, status),
                reason = COALESCE($6, reason)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(i64::from(id))
            .bind(changes.patient_id.map(i64::from))
            .bind(changes.doctor_id.map(i64::from))
            .bind(changes.scheduled_at)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.reason)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM appointments WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
