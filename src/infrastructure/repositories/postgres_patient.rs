use super::error::{map_sqlx, stored_enum, stored_id};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::records::{NewPatient, Patient, PatientChanges, PatientRepository, RecordId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "id, full_name, dob, gender, phone, address, created_at";

#[derive(Clone)]
pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PatientRow {
    id: i64,
    full_name: String,
    dob: Option<NaiveDate>,
    gender: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DomainError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(Patient {
            id: stored_id(row.id)?,
            full_name: row.full_name,
            dob: row.dob,
            gender: row.gender.as_deref().map(stored_enum).transpose()?,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn insert(&self, patient: NewPatient) -> DomainResult<Patient> {
        let sql = format!(
            "INSERT INTO patients (full_name, dob, gender, phone, address, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PatientRow>(&sql)
            .bind(patient.full_name)
            .bind(patient.dob)
            .bind(patient.gender.map(|g| g.as_str()))
            .bind(patient.phone)
            .bind(patient.address)
            .bind(patient.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Patient::try_from(row)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Patient>> {
        let sql = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, PatientRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Patient::try_from)
            .transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Patient>> {
        let sql = format!("SELECT {COLUMNS} FROM patients ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, PatientRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Patient::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: RecordId,
        changes: PatientChanges,
    ) -> DomainResult<Option<Patient>> {
        let sql = format!(
            "UPDATE patients SET
                full_name = COALESCE($2, full_name),
                dob = COALESCE($3, dob),
                gender = COALESCE($4, gender),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PatientRow>(&sql)
            .bind(i64::from(id))
            .bind(changes.full_name)
            .bind(changes.dob)
            .bind(changes.gender.map(|g| g.as_str()))
            .bind(changes.phone)
            .bind(changes.address)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Patient::try_from)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM patients WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
