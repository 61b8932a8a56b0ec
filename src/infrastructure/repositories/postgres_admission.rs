use super::error::{map_sqlx, stored_enum, stored_id};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::records::{
    Admission, AdmissionChanges, AdmissionRepository, NewAdmission, RecordId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "id, patient_id, doctor_id, admitted_at, discharged_at, status, reason";

#[derive(Clone)]
pub struct PostgresAdmissionRepository {
    pool: PgPool,
}

impl PostgresAdmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AdmissionRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    admitted_at: DateTime<Utc>,
    discharged_at: Option<DateTime<Utc>>,
    status: String,
    reason: Option<String>,
}

impl TryFrom<AdmissionRow> for Admission {
    type Error = DomainError;

    fn try_from(row: AdmissionRow) -> Result<Self, Self::Error> {
        Ok(Admission {
            id: stored_id(row.id)?,
            patient_id: stored_id(row.patient_id)?,
            doctor_id: stored_id(row.doctor_id)?,
            admitted_at: row.admitted_at,
            discharged_at: row.discharged_at,
            status: stored_enum(&row.status)?,
            reason: row.reason,
        })
    }
}

#[async_trait]
impl AdmissionRepository for PostgresAdmissionRepository {
    async fn insert(&self, admission: NewAdmission) -> DomainResult<Admission> {
        let sql = format!(
            "INSERT INTO admissions (patient_id, doctor_id, admitted_at, discharged_at, status, reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdmissionRow>(&sql)
            .bind(i64::from(admission.patient_id))
            .bind(i64::from(admission.doctor_id))
            .bind(admission.admitted_at)
            .bind(admission.discharged_at)
            .bind(admission.status.as_str())
            .bind(admission.reason)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Admission::try_from(row)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Admission>> {
        let sql = format!("SELECT {COLUMNS} FROM admissions WHERE id = $1");
        sqlx::query_as::<_, AdmissionRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Admission::try_from)
            .transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Admission>> {
        let sql = format!("SELECT {COLUMNS} FROM admissions ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, AdmissionRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Admission::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: RecordId,
        changes: AdmissionChanges,
    ) -> DomainResult<Option<Admission>> {
        let sql = format!(
            "UPDATE admissions SET
                patient_id = COALESCE($2, patient_id),
                doctor_id = COALESCE($3, doctor_id),
                admitted_at = COALESCE($4, admitted_at),
                discharged_at = COALESCE($5, discharged_at),
                status = COALESCE($6, status),
                reason = COALESCE($7, reason)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdmissionRow>(&sql)
            .bind(i64::from(id))
            .bind(changes.patient_id.map(i64::from))
            .bind(changes.doctor_id.map(i64::from))
            .bind(changes.admitted_at)
            .bind(changes.discharged_at)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.reason)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Admission::try_from)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM admissions WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM admissions WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
