//! Payroll run aggregate and approval state machine.
//!
//! A [`PayrollRun`] is the financial record for one pay period. It owns its
//! per-employee [`PayrollDetail`] rows, carries aggregate totals, and moves
//! through the approval workflow via the transition methods defined here.
//! Once a run reaches [`PayrollStatus::Processed`] it is locked: no detail
//! may be added and no further transition is permitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PayrollDetail};

/// The approval status of a payroll run.
///
/// ```text
/// COMPUTED -> CHECKED -> PROCESSED
///     \         /
///      REJECTED            AUTHORIZED -> PROCESSED (legacy two-step path)
/// ```
///
/// `Processed` is terminal. `Rejected` is reachable from `Computed` or
/// `Checked` and can be re-submitted into `Checked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    /// Pay has been computed; awaiting the checker.
    Computed,
    /// The checker has verified the run; awaiting authorization.
    Checked,
    /// Authorized but not yet processed. Only reachable through the legacy
    /// two-step workflow; the current authorize operation processes directly.
    Authorized,
    /// Terminal: pay is credited and the run is locked.
    Processed,
    /// Sent back by the checker or authorizer; may be re-checked.
    Rejected,
}

impl std::fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Computed => "COMPUTED",
            Self::Checked => "CHECKED",
            Self::Authorized => "AUTHORIZED",
            Self::Processed => "PROCESSED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// The payroll record for one (fortnight, year) pair.
///
/// Created by the orchestrator, mutated only through the transition methods,
/// and never deleted once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for this run.
    pub id: Uuid,
    /// The pay period this run covers.
    pub period: PayPeriod,
    /// The current approval status.
    pub status: PayrollStatus,
    /// True once the run has been processed; blocks all further mutation.
    pub locked: bool,

    /// Number of employees included in the run.
    pub total_employees: u32,
    /// Sum of gross salaries across all details.
    pub total_gross: Decimal,
    /// Sum of total deductions across all details.
    pub total_deductions: Decimal,
    /// Sum of net pay across all details.
    pub total_net_pay: Decimal,
    /// Sum of tax withheld across all details.
    pub total_tax: Decimal,
    /// Sum of employee superannuation across all details.
    pub total_super_employee: Decimal,
    /// Sum of employer superannuation across all details.
    pub total_super_employer: Decimal,

    /// Actor who computed the run.
    pub computed_by: String,
    /// When the run was computed.
    pub computed_at: DateTime<Utc>,
    /// Actor who checked (or rejected) the run, if any.
    pub checked_by: Option<String>,
    /// When the run was checked (or rejected).
    pub checked_at: Option<DateTime<Utc>>,
    /// Remarks recorded by the checker.
    pub checker_remarks: Option<String>,
    /// Actor who authorized the run, if any.
    pub authorized_by: Option<String>,
    /// When the run was authorized.
    pub authorized_at: Option<DateTime<Utc>>,
    /// Remarks recorded at authorization.
    pub authorization_remarks: Option<String>,
    /// Actor who processed the run, if any.
    pub processed_by: Option<String>,
    /// When the run was processed.
    pub processed_at: Option<DateTime<Utc>>,

    /// The per-employee details owned by this run.
    pub details: Vec<PayrollDetail>,
}

impl PayrollRun {
    /// Creates a new run in `Computed` status for the given period.
    pub fn new(period: PayPeriod, computed_by: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            status: PayrollStatus::Computed,
            locked: false,
            total_employees: 0,
            total_gross: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_net_pay: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            total_super_employee: Decimal::ZERO,
            total_super_employer: Decimal::ZERO,
            computed_by: computed_by.into(),
            computed_at: now,
            checked_by: None,
            checked_at: None,
            checker_remarks: None,
            authorized_by: None,
            authorized_at: None,
            authorization_remarks: None,
            processed_by: None,
            processed_at: None,
            details: Vec::new(),
        }
    }

    /// Adds a per-employee detail to the run and folds it into the
    /// aggregate totals.
    ///
    /// Fails with [`PayrollError::RunLocked`] once the run is processed:
    /// details are only added while the run is not locked.
    pub fn add_detail(&mut self, mut detail: PayrollDetail) -> PayrollResult<()> {
        if self.locked {
            return Err(PayrollError::RunLocked { id: self.id });
        }
        detail.run_id = self.id;
        self.total_employees += 1;
        self.total_gross += detail.gross_salary;
        self.total_deductions += detail.total_deductions;
        self.total_net_pay += detail.net_pay;
        self.total_tax += detail.tax;
        self.total_super_employee += detail.super_employee;
        self.total_super_employer += detail.super_employer;
        self.details.push(detail);
        Ok(())
    }

    /// Finds the detail for an employee, if present.
    pub fn detail_for(&self, employee_id: &str) -> Option<&PayrollDetail> {
        self.details.iter().find(|d| d.employee_id == employee_id)
    }

    /// Marks the run as checked.
    ///
    /// Allowed from `Computed` or `Rejected` (re-check after rejection).
    /// Returns the previous status for the audit event.
    pub fn check(
        &mut self,
        actor: &str,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> PayrollResult<PayrollStatus> {
        let old = self.status;
        if !matches!(old, PayrollStatus::Computed | PayrollStatus::Rejected) {
            return Err(PayrollError::InvalidTransition {
                action: "check",
                status: old,
            });
        }
        self.status = PayrollStatus::Checked;
        self.checked_by = Some(actor.to_string());
        self.checked_at = Some(now);
        self.checker_remarks = remarks;
        Ok(old)
    }

    /// Rejects the run, sending it back for correction.
    ///
    /// Allowed from `Computed` or `Checked`. Returns the previous status.
    pub fn reject(
        &mut self,
        actor: &str,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> PayrollResult<PayrollStatus> {
        let old = self.status;
        if !matches!(old, PayrollStatus::Computed | PayrollStatus::Checked) {
            return Err(PayrollError::InvalidTransition {
                action: "reject",
                status: old,
            });
        }
        self.status = PayrollStatus::Rejected;
        self.checked_by = Some(actor.to_string());
        self.checked_at = Some(now);
        self.checker_remarks = remarks;
        Ok(old)
    }

    /// Authorizes the run and processes it in one step, locking it.
    ///
    /// Allowed from `Checked` or `Computed`. The caller must perform the
    /// period-level idempotency check (no other PROCESSED run for this
    /// period) atomically with persisting this transition.
    pub fn authorize(
        &mut self,
        actor: &str,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> PayrollResult<PayrollStatus> {
        let old = self.status;
        if !matches!(old, PayrollStatus::Checked | PayrollStatus::Computed) {
            return Err(PayrollError::InvalidTransition {
                action: "authorize",
                status: old,
            });
        }
        self.authorized_by = Some(actor.to_string());
        self.authorized_at = Some(now);
        self.authorization_remarks = remarks;
        self.status = PayrollStatus::Processed;
        self.processed_by = Some(actor.to_string());
        self.processed_at = Some(now);
        self.locked = true;
        Ok(old)
    }

    /// Processes a run that was authorized through the legacy two-step
    /// workflow, locking it.
    ///
    /// Allowed from `Authorized` only. The same period-level idempotency
    /// check as [`PayrollRun::authorize`] applies at commit.
    pub fn process(&mut self, actor: &str, now: DateTime<Utc>) -> PayrollResult<PayrollStatus> {
        let old = self.status;
        if old != PayrollStatus::Authorized {
            return Err(PayrollError::InvalidTransition {
                action: "process",
                status: old,
            });
        }
        self.status = PayrollStatus::Processed;
        self.processed_by = Some(actor.to_string());
        self.processed_at = Some(now);
        self.locked = true;
        Ok(old)
    }
}
