use super::error::{map_sqlx, stored_enum, stored_id};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::records::{Invoice, InvoiceChanges, InvoiceRepository, NewInvoice, RecordId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

// NUMERIC(10,2) is read back as FLOAT8 so the row maps onto f64.
const COLUMNS: &str = "id, patient_id, appointment_id, admission_id, amount::FLOAT8 AS amount, \
                       payment_status, issued_at";

#[derive(Clone)]
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: i64,
    patient_id: i64,
    appointment_id: Option<i64>,
    admission_id: Option<i64>,
    amount: f64,
    payment_status: String,
    issued_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DomainError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: stored_id(row.id)?,
            patient_id: stored_id(row.patient_id)?,
            appointment_id: row.appointment_id.map(stored_id).transpose()?,
            admission_id: row.admission_id.map(stored_id).transpose()?,
            amount: row.amount,
            payment_status: stored_enum(&row.payment_status)?,
            issued_at: row.issued_at,
        })
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn insert(&self, invoice: NewInvoice) -> DomainResult<Invoice> {
        let sql = format!(
            "INSERT INTO invoices
                (patient_id, appointment_id, admission_id, amount, payment_status, issued_at)
             VALUES ($1, $2, $3, $4::NUMERIC, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(i64::from(invoice.patient_id))
            .bind(invoice.appointment_id.map(i64::from))
            .bind(invoice.admission_id.map(i64::from))
            .bind(invoice.amount)
            .bind(invoice.payment_status.as_str())
            .bind(invoice.issued_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Invoice::try_from(row)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Invoice>> {
        let sql = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Invoice::try_from)
            .transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Invoice>> {
        let sql = format!("SELECT {COLUMNS} FROM invoices ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }

    async fn update(&self, id: RecordId, changes: InvoiceChanges) -> DomainResult<Option<Invoice>> {
        let sql = format!(
            "UPDATE invoices SET
                appointment_id = COALESCE($2, appointment_id),
                admission_id = COALESCE($3, admission_id),
                amount = COALESCE($4::NUMERIC, amount),
                payment_status = COALESCE($5, payment_status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(i64::from(id))
            .bind(changes.appointment_id.map(i64::from))
            .bind(changes.admission_id.map(i64::from))
            .bind(changes.amount)
            .bind(changes.payment_status.map(|s| s.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Invoice::try_from)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
