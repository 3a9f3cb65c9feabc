//! Payroll orchestration and the approval workflow.
//!
//! [`PayrollEngine`] drives the full lifecycle of a payroll run: computing
//! pay for every active employee, persisting the run, and moving it through
//! check, rejection, authorization, and processing. All collaborators are
//! reached through the traits in [`crate::ports`], so the engine itself is
//! pure orchestration.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_for_employee;
use crate::config::resolve_effective;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PayrollDetail, PayrollRun, PayrollStatus};
use crate::ports::{
    AttendanceLedger, AuditEvent, AuditSink, ConfigStore, EmployeeDirectory, RequestLedger,
    RunStore,
};

/// The payroll orchestrator.
///
/// Holds its collaborators behind `Arc<dyn Trait>` so one engine can be
/// shared across the HTTP handlers and background tasks.
pub struct PayrollEngine {
    directory: Arc<dyn EmployeeDirectory>,
    attendance: Arc<dyn AttendanceLedger>,
    requests: Arc<dyn RequestLedger>,
    configs: Arc<dyn ConfigStore>,
    runs: Arc<dyn RunStore>,
    audit: Arc<dyn AuditSink>,
}

impl PayrollEngine {
    /// Creates an engine wired to the given collaborators.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        attendance: Arc<dyn AttendanceLedger>,
        requests: Arc<dyn RequestLedger>,
        configs: Arc<dyn ConfigStore>,
        runs: Arc<dyn RunStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            directory,
            attendance,
            requests,
            configs,
            runs,
            audit,
        }
    }

    /// Computes payroll for a period, creating a run in COMPUTED status.
    ///
    /// Pay is computed for every active employee before anything is
    /// persisted; a failure for any employee abandons the whole run, so no
    /// partial run is ever stored. Consumed overtime requests are marked
    /// included only after the run commits.
    pub fn compute_payroll(
        &self,
        fortnight: u32,
        year: i32,
        actor: &str,
    ) -> PayrollResult<PayrollRun> {
        let period = PayPeriod::for_fortnight(fortnight, year);
        let effective = resolve_effective(self.configs.as_ref(), period.start);
        let max = effective.payroll.fortnights_per_year;
        if fortnight == 0 || fortnight > max {
            return Err(PayrollError::InvalidPeriod { fortnight, max });
        }
        if self.runs.find_by_period(fortnight, year).is_some() {
            return Err(PayrollError::DuplicateRun { fortnight, year });
        }
        if effective.degraded() {
            warn!(fortnight, year, "computing payroll under built-in default configuration");
        }

        // A truncated final period can land entirely on a weekend; fall
        // back to the configured convention rather than divide by zero.
        let total_working_days = match period.working_days() {
            0 => effective.payroll.working_days_per_fortnight,
            days => days,
        };

        let now = Utc::now();
        let mut run = PayrollRun::new(period, actor, now);
        let mut consumed_overtime: Vec<Uuid> = Vec::new();

        for employee in self.directory.list_active() {
            let computed = compute_for_employee(
                &employee,
                &period,
                total_working_days,
                &effective,
                self.attendance.as_ref(),
                self.requests.as_ref(),
            )?;
            run.add_detail(computed.detail)?;
            consumed_overtime.extend(computed.consumed_overtime);
        }

        let run = self.runs.insert(run)?;
        for request_id in &consumed_overtime {
            self.requests.mark_included(*request_id);
        }

        info!(
            run_id = %run.id,
            fortnight,
            year,
            employees = run.total_employees,
            total_net = %run.total_net_pay,
            "payroll computed"
        );
        self.record_audit(&run, "COMPUTE", actor, None);
        Ok(run)
    }

    /// Marks a run as checked. Allowed from COMPUTED or REJECTED.
    pub fn check_payroll(
        &self,
        run_id: Uuid,
        remarks: Option<String>,
        actor: &str,
    ) -> PayrollResult<PayrollRun> {
        self.transition(run_id, "CHECK", actor, |run, now| {
            run.check(actor, remarks.clone(), now)
        })
    }

    /// Rejects a run, sending it back for correction. Allowed from COMPUTED
    /// or CHECKED.
    pub fn reject_payroll(
        &self,
        run_id: Uuid,
        remarks: Option<String>,
        actor: &str,
    ) -> PayrollResult<PayrollRun> {
        self.transition(run_id, "REJECT", actor, |run, now| {
            run.reject(actor, remarks.clone(), now)
        })
    }

    /// Authorizes a run and processes it in one step, locking it.
    ///
    /// The store commit verifies atomically that no other run for the same
    /// period has already been processed, so two racing authorizers cannot
    /// both credit pay.
    pub fn authorize_payroll(
        &self,
        run_id: Uuid,
        remarks: Option<String>,
        actor: &str,
    ) -> PayrollResult<PayrollRun> {
        self.transition(run_id, "AUTHORIZE", actor, |run, now| {
            run.authorize(actor, remarks.clone(), now)
        })
    }

    /// Processes a run left in AUTHORIZED by the legacy two-step workflow.
    pub fn process_payroll(&self, run_id: Uuid, actor: &str) -> PayrollResult<PayrollRun> {
        self.transition(run_id, "PROCESS", actor, |run, now| run.process(actor, now))
    }

    /// Fetches an employee's payslip for a period.
    ///
    /// An unknown employee is a not-found, regardless of the run's state;
    /// for known employees, payslips become visible only once the owning
    /// run is PROCESSED.
    pub fn get_payslip(
        &self,
        employee_id: &str,
        fortnight: u32,
        year: i32,
    ) -> PayrollResult<PayrollDetail> {
        if self.directory.find(employee_id).is_none() {
            return Err(PayrollError::PayslipNotFound {
                employee_id: employee_id.to_string(),
                fortnight,
                year,
            });
        }
        let run = self
            .runs
            .find_by_period(fortnight, year)
            .ok_or(PayrollError::RunNotFoundForPeriod { fortnight, year })?;
        if run.status != PayrollStatus::Processed {
            return Err(PayrollError::PayslipNotAvailable { status: run.status });
        }
        run.detail_for(employee_id)
            .cloned()
            .ok_or_else(|| PayrollError::PayslipNotFound {
                employee_id: employee_id.to_string(),
                fortnight,
                year,
            })
    }

    /// Lists all runs, most recent period first.
    pub fn list_runs(&self) -> Vec<PayrollRun> {
        self.runs.list()
    }

    /// Fetches a run by id.
    pub fn run_by_id(&self, run_id: Uuid) -> PayrollResult<PayrollRun> {
        self.runs.get(run_id).ok_or(PayrollError::RunNotFound { id: run_id })
    }

    /// Fetches the per-employee details of a run.
    pub fn details_by_run(&self, run_id: Uuid) -> PayrollResult<Vec<PayrollDetail>> {
        Ok(self.run_by_id(run_id)?.details)
    }

    /// Lists runs awaiting the checker.
    pub fn runs_pending_check(&self) -> Vec<PayrollRun> {
        self.runs_with_status(PayrollStatus::Computed)
    }

    /// Lists runs awaiting authorization.
    pub fn runs_pending_authorization(&self) -> Vec<PayrollRun> {
        self.runs_with_status(PayrollStatus::Checked)
    }

    /// Lists legacy runs awaiting the separate processing step.
    pub fn runs_pending_processing(&self) -> Vec<PayrollRun> {
        self.runs_with_status(PayrollStatus::Authorized)
    }

    /// Lists an employee's payslips from processed runs, most recent period
    /// first.
    pub fn employee_payslips(&self, employee_id: &str) -> Vec<PayrollDetail> {
        self.runs
            .list()
            .into_iter()
            .filter(|r| r.status == PayrollStatus::Processed)
            .filter_map(|r| r.detail_for(employee_id).cloned())
            .collect()
    }

    fn runs_with_status(&self, status: PayrollStatus) -> Vec<PayrollRun> {
        self.runs
            .list()
            .into_iter()
            .filter(|r| r.status == status)
            .collect()
    }

    /// Loads a run, applies a transition, and commits it with a
    /// compare-and-set against the pre-transition status.
    fn transition<F>(
        &self,
        run_id: Uuid,
        action: &'static str,
        actor: &str,
        mut apply: F,
    ) -> PayrollResult<PayrollRun>
    where
        F: FnMut(&mut PayrollRun, chrono::DateTime<Utc>) -> PayrollResult<PayrollStatus>,
    {
        let mut run = self.run_by_id(run_id)?;
        let now = Utc::now();
        let old = apply(&mut run, now)?;
        let run = self.runs.update_if_status(run, old)?;

        info!(
            run_id = %run.id,
            fortnight = run.period.fortnight,
            year = run.period.year,
            from = %old,
            to = %run.status,
            "payroll transition"
        );
        self.record_audit(&run, action, actor, Some(old));
        Ok(run)
    }

    /// Emits an audit event. A failing sink is logged and ignored; audit is
    /// an annotation, never a gate.
    fn record_audit(
        &self,
        run: &PayrollRun,
        action: &'static str,
        actor: &str,
        old_status: Option<PayrollStatus>,
    ) {
        let event = AuditEvent {
            entity_type: "PayrollRun".to_string(),
            entity_id: run.id.to_string(),
            action: action.to_string(),
            actor: actor.to_string(),
            old_value: old_status.map(|s| s.to_string()),
            new_value: run.status.to_string(),
            at: Utc::now(),
        };
        if let Err(message) = self.audit.record(event) {
            warn!(run_id = %run.id, action, %message, "audit record failed");
        }
    }
}
