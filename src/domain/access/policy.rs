// src/domain/access/policy.rs
use super::role_set::{ADMIN, CARE_TEAM, CLINICAL, FRONT_DESK, RoleSet, STAFF};
use crate::domain::records::RecordKind;
use crate::domain::user::Role;

/// What a guarded route demands from its caller once authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    AnyAuthenticated,
    Roles(RoleSet),
}

impl AccessPolicy {
    pub fn permits(self, role: Role) -> bool {
        match self {
            AccessPolicy::AnyAuthenticated => true,
            AccessPolicy::Roles(set) => set.contains(role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Every guarded endpoint of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Register,
    CurrentUser,
    ListUsers,
    UpdateUser,
    ListAuditLogs,
    Record(RecordKind, Operation),
}

impl Route {
    /// The route table. Handlers never re-derive these sets.
    pub const fn policy(self) -> AccessPolicy {
        use AccessPolicy::{AnyAuthenticated, Roles};
        use Operation::{Create, Delete, Get, List, Update};
        use RecordKind::{Admissions, Appointments, Doctors, Invoices, Patients, Prescriptions};

        match self {
            Route::Register | Route::ListUsers | Route::UpdateUser | Route::ListAuditLogs => {
                Roles(ADMIN)
            }
            Route::CurrentUser => AnyAuthenticated,

            Route::Record(Patients, List | Get) => Roles(STAFF),
            Route::Record(Patients, Create | Update) => Roles(FRONT_DESK),

            Route::Record(Doctors, List | Get) => AnyAuthenticated,
            Route::Record(Doctors, Create | Update) => Roles(ADMIN),

            Route::Record(Appointments, List | Get | Create | Update) => Roles(STAFF),
            Route::Record(Appointments, Delete) => Roles(FRONT_DESK),

            Route::Record(Admissions, List | Get | Create | Update) => Roles(CARE_TEAM),

            Route::Record(Prescriptions, List | Get) => Roles(CARE_TEAM),
            Route::Record(Prescriptions, Create | Update) => Roles(CLINICAL),

            Route::Record(Invoices, List | Get | Create | Update) => Roles(FRONT_DESK),

            Route::Record(
                Patients | Doctors | Admissions | Prescriptions | Invoices,
                Delete,
            ) => Roles(ADMIN),
        }
    }
}
