// tests/support/mocks/records.rs
use async_trait::async_trait;
use hospital_core::application::services::RecordRepositories;
use hospital_core::domain::{
    errors::DomainResult,
    records::{
        Admission, AdmissionChanges, AdmissionRepository, Appointment, AppointmentChanges,
        AppointmentRepository, Doctor, DoctorChanges, DoctorRepository, Invoice, InvoiceChanges,
        InvoiceRepository, NewAdmission, NewAppointment, NewDoctor, NewInvoice, NewPatient,
        NewPrescription, Patient, PatientChanges, PatientRepository, Prescription,
        PrescriptionChanges, PrescriptionRepository, RecordId,
    },
};
use std::sync::{Arc, Mutex};

/// Vec-backed table with ids that are never reused.
macro_rules! memory_table {
    ($name:ident, $entity:ty, $new:ty, $changes:ty, $port:path, $build:expr) => {
        #[derive(Default)]
        pub struct $name {
            rows: Mutex<Vec<$entity>>,
            next_id: Mutex<i64>,
        }

        impl $name {
            pub fn len(&self) -> usize {
                self.rows.lock().unwrap().len()
            }
        }

        #[async_trait]
        impl $port for $name {
            async fn insert(&self, new: $new) -> DomainResult<$entity> {
                let build: fn(RecordId, $new) -> $entity = $build;
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                let row = build(RecordId(*next_id), new);
                self.rows.lock().unwrap().push(row.clone());
                Ok(row)
            }

            async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<$entity>> {
                Ok(self
                    .rows
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|row| row.id == id)
                    .cloned())
            }

            async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<$entity>> {
                Ok(self
                    .rows
                    .lock()
                    .unwrap()
                    .iter()
                    .skip(skip as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect())
            }

            async fn update(&self, id: RecordId, changes: $changes) -> DomainResult<Option<$entity>> {
                let mut rows = self.rows.lock().unwrap();
                Ok(rows.iter_mut().find(|row| row.id == id).map(|row| {
                    row.apply(changes);
                    row.clone()
                }))
            }

            async fn delete(&self, id: RecordId) -> DomainResult<bool> {
                let mut rows = self.rows.lock().unwrap();
                let before = rows.len();
                rows.retain(|row| row.id != id);
                Ok(rows.len() != before)
            }
        }
    };
}

memory_table!(
    InMemoryPatients,
    Patient,
    NewPatient,
    PatientChanges,
    PatientRepository,
    |id, new| Patient {
        id,
        full_name: new.full_name,
        dob: new.dob,
        gender: new.gender,
        phone: new.phone,
        address: new.address,
        created_at: new.created_at,
    }
);

memory_table!(
    InMemoryDoctors,
    Doctor,
    NewDoctor,
    DoctorChanges,
    DoctorRepository,
    |id, new| Doctor {
        id,
        full_name: new.full_name,
        speciality: new.speciality,
        phone: new.phone,
        created_at: new.created_at,
    }
);

memory_table!(
    InMemoryAppointments,
    Appointment,
    NewAppointment,
    AppointmentChanges,
    AppointmentRepository,
    |id, new| Appointment {
        id,
        patient_id: new.patient_id,
        doctor_id: new.doctor_id,
        scheduled_at: new.scheduled_at,
        status: new.status,
        reason: new.reason,
    }
);

memory_table!(
    InMemoryAdmissions,
    Admission,
    NewAdmission,
    AdmissionChanges,
    AdmissionRepository,
    |id, new| Admission {
        id,
        patient_id: new.patient_id,
        doctor_id: new.doctor_id,
        admitted_at: new.admitted_at,
        discharged_at: new.discharged_at,
        status: new.status,
        reason: new.reason,
    }
);

memory_table!(
    InMemoryPrescriptions,
    Prescription,
    NewPrescription,
    PrescriptionChanges,
    PrescriptionRepository,
    |id, new| Prescription {
        id,
        patient_id: new.patient_id,
        doctor_id: new.doctor_id,
        appointment_id: new.appointment_id,
        medication: new.medication,
        dosage: new.dosage,
        frequency: new.frequency,
        instructions: new.instructions,
        created_at: new.created_at,
    }
);

memory_table!(
    InMemoryInvoices,
    Invoice,
    NewInvoice,
    InvoiceChanges,
    InvoiceRepository,
    |id, new| Invoice {
        id,
        patient_id: new.patient_id,
        appointment_id: new.appointment_id,
        admission_id: new.admission_id,
        amount: new.amount,
        payment_status: new.payment_status,
        issued_at: new.issued_at,
    }
);

#[derive(Clone, Default)]
pub struct InMemoryRecords {
    pub patients: Arc<InMemoryPatients>,
    pub doctors: Arc<InMemoryDoctors>,
    pub appointments: Arc<InMemoryAppointments>,
    pub admissions: Arc<InMemoryAdmissions>,
    pub prescriptions: Arc<InMemoryPrescriptions>,
    pub invoices: Arc<InMemoryInvoices>,
}

impl InMemoryRecords {
    pub fn ports(&self) -> RecordRepositories {
        RecordRepositories {
            patients: self.patients.clone(),
            doctors: self.doctors.clone(),
            appointments: self.appointments.clone(),
            admissions: self.admissions.clone(),
            prescriptions: self.prescriptions.clone(),
            invoices: self.invoices.clone(),
        }
    }
}
