use super::error::{map_sqlx, stored_id};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::records::{Doctor, DoctorChanges, DoctorRepository, NewDoctor, RecordId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "id, full_name, speciality, phone, created_at";

#[derive(Clone)]
pub struct PostgresDoctorRepository {
    pool: PgPool,
}

impl PostgresDoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DoctorRow {
    id: i64,
    full_name: String,
    speciality: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DoctorRow> for Doctor {
    type Error = DomainError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        Ok(Doctor {
            id: stored_id(row.id)?,
            full_name: row.full_name,
            speciality: row.speciality,
            phone: row.phone,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl DoctorRepository for PostgresDoctorRepository {
    async fn insert(&self, doctor: NewDoctor) -> DomainResult<Doctor> {
        let sql = format!(
            "INSERT INTO doctors (full_name, speciality, phone, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DoctorRow>(&sql)
            .bind(doctor.full_name)
            .bind(doctor.speciality)
            .bind(doctor.phone)
            .bind(doctor.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Doctor::try_from(row)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Doctor>> {
        let sql = format!("SELECT {COLUMNS} FROM doctors WHERE id = $1");
        sqlx::query_as::<_, DoctorRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Doctor::try_from)
            .transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Doctor>> {
        let sql = format!("SELECT {COLUMNS} FROM doctors ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, DoctorRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Doctor::try_from)
            .collect()
    }

    async fn update(&self, id: RecordId, changes: DoctorChanges) -> DomainResult<Option<Doctor>> {
        let sql = format!(
            "UPDATE doctors SET
                full_name = COALESCE($2, full_name),
                speciality = COALESCE($3, speciality),
                phone = COALESCE($4, phone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DoctorRow>(&sql)
            .bind(i64::from(id))
            .bind(changes.full_name)
            .bind(changes.speciality)
            .bind(changes.phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Doctor::try_from)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM doctors WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
