// src/domain/records/invoice.rs
use super::{RecordId, text_enum};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

text_enum! {
    PaymentStatus {
        Unpaid => "unpaid",
        Partial => "partial",
        Paid => "paid",
    }
}

/// Amounts are stored as NUMERIC(10,2).
const AMOUNT_MAX: f64 = 99_999_999.99;

/// Round to cents and require a strictly positive, storable amount.
pub fn validate_amount(amount: f64) -> DomainResult<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::validation("amount must be greater than zero"));
    }
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded <= 0.0 {
        return Err(DomainError::validation("amount must be at least 0.01"));
    }
    if rounded > AMOUNT_MAX {
        return Err(DomainError::validation("amount is too large"));
    }
    Ok(rounded)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub appointment_id: Option<RecordId>,
    pub admission_id: Option<RecordId>,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    pub fn apply(&mut self, changes: InvoiceChanges) {
        if changes.appointment_id.is_some() {
            self.appointment_id = changes.appointment_id;
        }
        if changes.admission_id.is_some() {
            self.admission_id = changes.admission_id;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(status) = changes.payment_status {
            self.payment_status = status;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub patient_id: RecordId,
    pub appointment_id: Option<RecordId>,
    pub admission_id: Option<RecordId>,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub issued_at: DateTime<Utc>,
}

impl NewInvoice {
    pub fn new(
        patient_id: RecordId,
        appointment_id: Option<RecordId>,
        admission_id: Option<RecordId>,
        amount: f64,
        payment_status: Option<PaymentStatus>,
        issued_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            patient_id,
            appointment_id,
            admission_id,
            amount: validate_amount(amount)?,
            payment_status: payment_status.unwrap_or(PaymentStatus::Unpaid),
            issued_at,
        })
    }
}

/// The billed patient is fixed once the invoice exists.
#[derive(Debug, Clone, Default)]
pub struct InvoiceChanges {
    pub appointment_id: Option<RecordId>,
    pub admission_id: Option<RecordId>,
    pub amount: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
}

impl InvoiceChanges {
    pub fn validated(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        Ok(Self {
            amount: self.amount.map(validate_amount).transpose()?,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.appointment_id.is_none()
            && self.admission_id.is_none()
            && self.amount.is_none()
            && self.payment_status.is_none()
    }
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn insert(&self, invoice: NewInvoice) -> DomainResult<Invoice>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Invoice>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Invoice>>;

    async fn update(&self, id: RecordId, changes: InvoiceChanges)
    -> DomainResult<Option<Invoice>>;

    async fn delete(&self, id: RecordId) -> DomainResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_is_rounded_to_cents() {
        assert!((validate_amount(12.346).unwrap() - 12.35).abs() < 1e-9);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(0.004).is_err());
        assert!(validate_amount(f64::NAN).is_err());
    }

    #[test]
    fn payment_status_defaults_to_unpaid() {
        let invoice =
            NewInvoice::new(RecordId(1), None, None, 100.0, None, Utc::now()).unwrap();
        assert_eq!(invoice.payment_status, PaymentStatus::Unpaid);
    }
}
