//! Collaborator interfaces for the payroll engine.
//!
//! The engine owns payroll computation and the approval workflow; employees,
//! attendance, requests, configuration, persistence, and audit logging are
//! external subsystems reached through the traits in this module. The
//! [`crate::store`] module provides in-memory reference implementations.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::config::{PayrollConfiguration, TaxConfiguration};
use crate::error::PayrollResult;
use crate::models::{Employee, LeaveRequest, OvertimeRequest, PayrollRun, PayrollStatus};

/// Read-only view of the employee directory.
pub trait EmployeeDirectory: Send + Sync {
    /// Lists all active employees, in a stable order.
    fn list_active(&self) -> Vec<Employee>;

    /// Finds an employee by id, active or not.
    fn find(&self, employee_id: &str) -> Option<Employee>;
}

/// Read-only view of recorded attendance.
pub trait AttendanceLedger: Send + Sync {
    /// Counts the days the employee was recorded present in the date range.
    ///
    /// A count of zero is read by the computation as "no attendance data"
    /// and triggers the full-attendance fallback; absence of data is not
    /// treated as absence from work.
    fn count_present_days(&self, employee_id: &str, start: NaiveDate, end: NaiveDate) -> u32;

    /// Counts the days the employee was recorded late in the date range.
    fn count_late_days(&self, employee_id: &str, start: NaiveDate, end: NaiveDate) -> u32;
}

/// View of approved employee requests, with the once-only inclusion flag
/// for overtime.
pub trait RequestLedger: Send + Sync {
    /// Returns approved overtime requests for the employee in the range
    /// that have not yet been included in any payroll run.
    fn approved_overtime_not_included(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<OvertimeRequest>;

    /// Marks an overtime request as included in payroll so it is never
    /// paid twice.
    fn mark_included(&self, request_id: Uuid);

    /// Returns approved leave requests for the employee in the range.
    fn approved_leave_in_period(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<LeaveRequest>;
}

/// One audit event emitted by a workflow transition.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    /// The kind of entity acted on (e.g., "PayrollRun").
    pub entity_type: String,
    /// The identifier of the entity acted on.
    pub entity_id: String,
    /// The action performed (e.g., "COMPUTE", "CHECK", "AUTHORIZE").
    pub action: String,
    /// The already-authorized actor identity, for the audit trail.
    pub actor: String,
    /// State before the action, if meaningful.
    pub old_value: Option<String>,
    /// State after the action.
    pub new_value: String,
    /// When the event was emitted.
    pub at: DateTime<Utc>,
}

/// Fire-and-forget audit sink.
///
/// A failing sink must not block the business transition it annotates; the
/// engine logs the failure and proceeds.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: AuditEvent) -> Result<(), String>;
}

/// Read-only store of configuration records.
///
/// Selection of the single active record for a date is performed by
/// [`crate::config::resolve_effective`], not by implementations.
pub trait ConfigStore: Send + Sync {
    /// Returns all payroll configuration records.
    fn payroll_configurations(&self) -> Vec<PayrollConfiguration>;

    /// Returns all tax configuration records.
    fn tax_configurations(&self) -> Vec<TaxConfiguration>;
}

/// Persistence for payroll runs.
///
/// Implementations must make [`RunStore::insert`] unique per
/// (fortnight, year) and must make the period-level "already processed"
/// check in [`RunStore::update_if_status`] atomic with the status update,
/// so that two racing authorizers cannot both reach PROCESSED.
pub trait RunStore: Send + Sync {
    /// Inserts a new run. Fails with [`crate::error::PayrollError::DuplicateRun`]
    /// if a run already exists for the same period.
    fn insert(&self, run: PayrollRun) -> PayrollResult<PayrollRun>;

    /// Fetches a run by id.
    fn get(&self, id: Uuid) -> Option<PayrollRun>;

    /// Fetches the run for a period, if any.
    fn find_by_period(&self, fortnight: u32, year: i32) -> Option<PayrollRun>;

    /// True if a PROCESSED run exists for the period.
    fn is_period_processed(&self, fortnight: u32, year: i32) -> bool;

    /// Persists an updated run only if the stored run still has the
    /// expected status (compare-and-set). When the update's status is
    /// PROCESSED, implementations must also verify, atomically, that no
    /// other run for the same period is already PROCESSED.
    fn update_if_status(
        &self,
        run: PayrollRun,
        expected: PayrollStatus,
    ) -> PayrollResult<PayrollRun>;

    /// Lists all runs, most recent period first.
    fn list(&self) -> Vec<PayrollRun>;
}
