use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use super::{ListRecordsQuery, RecordAuditor, audit_target, record_id};
use crate::application::{
    audit::RequestActor,
    dto::{DeletedDto, PatientDto},
    error::ApplicationResult,
    ports::time::Clock,
};
use crate::domain::{
    access::Operation,
    records::{Gender, NewPatient, PatientChanges, PatientRepository, mask_sensitive},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePatientCommand {
    pub full_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePatientCommand {
    pub full_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
    auditor: RecordAuditor,
    clock: Arc<dyn Clock>,
}

impl PatientService {
    pub(crate) fn new(
        repo: Arc<dyn PatientRepository>,
        auditor: RecordAuditor,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            auditor,
            clock,
        }
    }

    pub async fn create(
        &self,
        actor: &RequestActor,
        command: CreatePatientCommand,
    ) -> ApplicationResult<PatientDto> {
        let details = command
            .phone
            .as_deref()
            .map(|phone| format!("phone {}", mask_sensitive(phone, 4)));
        let outcome: ApplicationResult<PatientDto> = async {
            let new = NewPatient::new(
                command.full_name,
                command.dob,
                command.gender,
                command.phone,
                command.address,
                self.clock.now(),
            )?;
            Ok(PatientDto::from(self.repo.insert(new).await?))
        }
        .await;
        self.auditor
            .finish(actor, Operation::Create, None, details, outcome, |p| p.id)
            .await
    }

    pub async fn get(&self, actor: &RequestActor, id: i64) -> ApplicationResult<PatientDto> {
        let outcome: ApplicationResult<PatientDto> = async {
            let id = record_id(id)?;
            self.repo
                .find_by_id(id)
                .await?
                .map(PatientDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Get, audit_target(id), None, outcome, |p| p.id)
            .await
    }

    pub async fn list(
        &self,
        actor: &RequestActor,
        query: ListRecordsQuery,
    ) -> ApplicationResult<Vec<PatientDto>> {
        let (skip, limit) = query.window();
        let outcome: ApplicationResult<Vec<PatientDto>> = async {
            let rows = self.repo.list(skip, limit).await?;
            Ok(rows.into_iter().map(PatientDto::from).collect())
        }
        .await;
        self.auditor
            .finish(actor, Operation::List, None, None, outcome, |_| 0)
            .await
    }

    pub async fn update(
        &self,
        actor: &RequestActor,
        id: i64,
        command: UpdatePatientCommand,
    ) -> ApplicationResult<PatientDto> {
        let outcome: ApplicationResult<PatientDto> = async {
            let id = record_id(id)?;
            let changes = PatientChanges {
                full_name: command.full_name,
                dob: command.dob,
                gender: command.gender,
                phone: command.phone,
                address: command.address,
            }
            .validated()?;
            self.repo
                .update(id, changes)
                .await?
                .map(PatientDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Update, audit_target(id), None, outcome, |p| p.id)
            .await
    }

    pub async fn delete(&self, actor: &RequestActor, id: i64) -> ApplicationResult<DeletedDto> {
        let kind = self.auditor.kind();
        let outcome: ApplicationResult<DeletedDto> = async {
            let id = record_id(id)?;
            if self.repo.delete(id).await? {
                Ok(DeletedDto::new(kind.singular()))
            } else {
                Err(kind.not_found().into())
            }
        }
        .await;
        self.auditor
            .finish(actor, Operation::Delete, audit_target(id), None, outcome, |_| 0)
            .await
    }
}
