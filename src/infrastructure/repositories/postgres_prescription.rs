use super::error::{map_sqlx, stored_id};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::records::{
    NewPrescription, Prescription, PrescriptionChanges, PrescriptionRepository, RecordId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "id, patient_id, doctor_id, appointment_id, medication, dosage, frequency, \
                       instructions, created_at";

#[derive(Clone)]
pub struct PostgresPrescriptionRepository {
    pool: PgPool,
}

impl PostgresPrescriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PrescriptionRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    appointment_id: Option<i64>,
    medication: String,
    dosage: Option<String>,
    frequency: Option<String>,
    instructions: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PrescriptionRow> for Prescription {
    type Error = DomainError;

    fn try_from(row: PrescriptionRow) -> Result<Self, Self::Error> {
        Ok(Prescription {
            id: stored_id(row.id)?,
            patient_id: stored_id(row.patient_id)?,
            doctor_id: stored_id(row.doctor_id)?,
            appointment_id: row.appointment_id.map(stored_id).transpose()?,
            medication: row.medication,
            dosage: row.dosage,
            frequency: row.frequency,
            instructions: row.instructions,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PrescriptionRepository for PostgresPrescriptionRepository {
    async fn insert(&self, prescription: NewPrescription) -> DomainResult<Prescription> {
        let sql = format!(
            "INSERT INTO prescriptions
                (patient_id, doctor_id, appointment_id, medication, dosage, frequency, instructions, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrescriptionRow>(&sql)
            .bind(i64::from(prescription.patient_id))
            .bind(i64::from(prescription.doctor_id))
            .bind(prescription.appointment_id.map(i64::from))
            .bind(prescription.medication)
            .bind(prescription.dosage)
            .bind(prescription.frequency)
            .bind(prescription.instructions)
            .bind(prescription.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Prescription::try_from(row)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Prescription>> {
        let sql = format!("SELECT {COLUMNS} FROM prescriptions WHERE id = $1");
        sqlx::query_as::<_, PrescriptionRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Prescription::try_from)
            .transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Prescription>> {
        let sql = format!("SELECT {COLUMNS} FROM prescriptions ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, PrescriptionRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Prescription::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: RecordId,
        changes: PrescriptionChanges,
    ) -> DomainResult<Option<Prescription>> {
        let sql = format!(
            "UPDATE prescriptions SET
                appointment_id = COALESCE($2, appointment_id),
                medication = COALESCE($3, medication),
                dosage = COALESCE($4, dosage),
                frequency = COALESCE($5, frequency),
                instructions = COALESCE($6, instructions)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrescriptionRow>(&sql)
            .bind(i64::from(id))
            .bind(changes.appointment_id.map(i64::from))
            .bind(changes.medication)
            .bind(changes.dosage)
            .bind(changes.frequency)
            .bind(changes.instructions)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Prescription::try_from)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM prescriptions WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
