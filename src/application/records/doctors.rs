use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;

use super::{ListRecordsQuery, RecordAuditor, audit_target, record_id};
use crate::application::{
    audit::RequestActor,
    dto::{DeletedDto, DoctorDto},
    error::ApplicationResult,
    ports::time::Clock,
};
use crate::domain::{
    access::Operation,
    records::{DoctorChanges, DoctorRepository, NewDoctor},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDoctorCommand {
    pub full_name: String,
    pub speciality: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDoctorCommand {
    pub full_name: Option<String>,
    pub speciality: Option<String>,
    pub phone: Option<String>,
}

pub struct DoctorService {
    repo: Arc<dyn DoctorRepository>,
    auditor: RecordAuditor,
    clock: Arc<dyn Clock>,
}

impl DoctorService {
    pub(crate) fn new(
        repo: Arc<dyn DoctorRepository>,
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
        command: CreateDoctorCommand,
    ) -> ApplicationResult<DoctorDto> {
        let details = command
            .speciality
            .as_ref()
            .map(|speciality| format!("speciality {speciality}"));
        let outcome: ApplicationResult<DoctorDto> = async {
            let new = NewDoctor::new(
                command.full_name,
                command.speciality,
                command.phone,
                self.clock.now(),
            )?;
            Ok(DoctorDto::from(self.repo.insert(new).await?))
        }
        .await;
        self.auditor
            .finish(actor, Operation::Create, None, details, outcome, |d| d.id)
            .await
    }

    pub async fn get(&self, actor: &RequestActor, id: i64) -> ApplicationResult<DoctorDto> {
        let outcome: ApplicationResult<DoctorDto> = async {
            self.repo
                .find_by_id(record_id(id)?)
                .await?
                .map(DoctorDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Get, audit_target(id), None, outcome, |d| d.id)
            .await
    }

    pub async fn list(
        &self,
        actor: &RequestActor,
        query: ListRecordsQuery,
    ) -> ApplicationResult<Vec<DoctorDto>> {
        let (skip, limit) = query.window();
        let outcome: ApplicationResult<Vec<DoctorDto>> = async {
            let rows = self.repo.list(skip, limit).await?;
            Ok(rows.into_iter().map(DoctorDto::from).collect())
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
        command: UpdateDoctorCommand,
    ) -> ApplicationResult<DoctorDto> {
        let outcome: ApplicationResult<DoctorDto> = async {
            let changes = DoctorChanges {
                full_name: command.full_name,
                speciality: command.speciality,
                phone: command.phone,
            }
            .validated()?;
            self.repo
                .update(record_id(id)?, changes)
                .await?
                .map(DoctorDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Update, audit_target(id), None, outcome, |d| d.id)
            .await
    }

    pub async fn delete(&self, actor: &RequestActor, id: i64) -> ApplicationResult<DeletedDto> {
        let kind = self.auditor.kind();
        let outcome: ApplicationResult<DeletedDto> = async {
            if self.repo.delete(record_id(id)?).await? {
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
