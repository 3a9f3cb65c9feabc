//! `Mutex`-guarded in-memory stores.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, LeaveRequest, OvertimeRequest, PayrollRun, PayrollStatus};
use crate::ports::{
    AttendanceLedger, AuditEvent, AuditSink, EmployeeDirectory, RequestLedger, RunStore,
};

/// In-memory employee directory, keyed by employee id.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    employees: Mutex<Vec<Employee>>,
}

impl InMemoryDirectory {
    /// Creates a directory pre-populated with the given employees.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Mutex::new(employees),
        }
    }

    /// Adds an employee to the directory.
    pub fn add(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn list_active(&self) -> Vec<Employee> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_active)
            .cloned()
            .collect()
    }

    fn find(&self, employee_id: &str) -> Option<Employee> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
    }
}

#[derive(Debug, Clone, Copy)]
struct AttendanceEntry {
    date: NaiveDate,
    present: u32,
    late: u32,
}

/// In-memory attendance ledger.
///
/// Test setup records day counts at an anchor date; lookups sum every entry
/// whose anchor falls inside the queried range.
#[derive(Debug, Default)]
pub struct InMemoryAttendance {
    entries: Mutex<HashMap<String, Vec<AttendanceEntry>>>,
}

impl InMemoryAttendance {
    /// Records `days` present days for the employee, anchored at `date`.
    pub fn record_present(&self, employee_id: &str, date: NaiveDate, days: u32) {
        self.entries
            .lock()
            .unwrap()
            .entry(employee_id.to_string())
            .or_default()
            .push(AttendanceEntry {
                date,
                present: days,
                late: 0,
            });
    }

    /// Records `days` late arrivals for the employee, anchored at `date`.
    pub fn record_late(&self, employee_id: &str, date: NaiveDate, days: u32) {
        self.entries
            .lock()
            .unwrap()
            .entry(employee_id.to_string())
            .or_default()
            .push(AttendanceEntry {
                date,
                present: 0,
                late: days,
            });
    }

    fn sum(&self, employee_id: &str, start: NaiveDate, end: NaiveDate, f: fn(&AttendanceEntry) -> u32) -> u32 {
        self.entries
            .lock()
            .unwrap()
            .get(employee_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.date >= start && e.date <= end)
                    .map(f)
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl AttendanceLedger for InMemoryAttendance {
    fn count_present_days(&self, employee_id: &str, start: NaiveDate, end: NaiveDate) -> u32 {
        self.sum(employee_id, start, end, |e| e.present)
    }

    fn count_late_days(&self, employee_id: &str, start: NaiveDate, end: NaiveDate) -> u32 {
        self.sum(employee_id, start, end, |e| e.late)
    }
}

#[derive(Debug, Clone)]
struct StoredOvertime {
    request: OvertimeRequest,
    included: bool,
}

/// In-memory request ledger for approved overtime and leave.
#[derive(Debug, Default)]
pub struct InMemoryRequests {
    overtime: Mutex<Vec<StoredOvertime>>,
    leave: Mutex<Vec<(NaiveDate, LeaveRequest)>>,
}

impl InMemoryRequests {
    /// Adds an approved overtime request and returns its id.
    pub fn add_overtime(
        &self,
        employee_id: &str,
        date: NaiveDate,
        hours: Decimal,
        public_holiday: bool,
    ) -> Uuid {
        let request = OvertimeRequest {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            date,
            hours,
            public_holiday,
        };
        let id = request.id;
        self.overtime.lock().unwrap().push(StoredOvertime {
            request,
            included: false,
        });
        id
    }

    /// Adds an approved leave request anchored at `date` and returns its id.
    pub fn add_leave(&self, employee_id: &str, date: NaiveDate, total_days: Decimal) -> Uuid {
        let request = LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            total_days,
        };
        let id = request.id;
        self.leave.lock().unwrap().push((date, request));
        id
    }

    /// True if the overtime request has been marked as included in payroll.
    pub fn is_included(&self, request_id: Uuid) -> bool {
        self.overtime
            .lock()
            .unwrap()
            .iter()
            .any(|o| o.request.id == request_id && o.included)
    }
}

impl RequestLedger for InMemoryRequests {
    fn approved_overtime_not_included(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<OvertimeRequest> {
        self.overtime
            .lock()
            .unwrap()
            .iter()
            .filter(|o| {
                !o.included
                    && o.request.employee_id == employee_id
                    && o.request.date >= start
                    && o.request.date <= end
            })
            .map(|o| o.request.clone())
            .collect()
    }

    fn mark_included(&self, request_id: Uuid) {
        let mut overtime = self.overtime.lock().unwrap();
        if let Some(stored) = overtime.iter_mut().find(|o| o.request.id == request_id) {
            stored.included = true;
        }
    }

    fn approved_leave_in_period(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<LeaveRequest> {
        self.leave
            .lock()
            .unwrap()
            .iter()
            .filter(|(date, request)| {
                request.employee_id == employee_id && *date >= start && *date <= end
            })
            .map(|(_, request)| request.clone())
            .collect()
    }
}

/// In-memory audit trail.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    /// Returns a copy of all recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(&self, event: AuditEvent) -> Result<(), String> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Audit sink that rejects every event. Used to verify that audit failures
/// never block a workflow transition.
#[derive(Debug, Default)]
pub struct FailingAuditSink;

impl AuditSink for FailingAuditSink {
    fn record(&self, _event: AuditEvent) -> Result<(), String> {
        Err("audit backend unavailable".to_string())
    }
}

/// In-memory run store.
///
/// A single mutex guards the whole collection, which makes the uniqueness
/// check in `insert` and the period-idempotency check in `update_if_status`
/// atomic with their writes.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    runs: Mutex<Vec<PayrollRun>>,
}

impl RunStore for InMemoryRunStore {
    fn insert(&self, run: PayrollRun) -> PayrollResult<PayrollRun> {
        let mut runs = self.runs.lock().unwrap();
        if runs.iter().any(|r| {
            r.period.fortnight == run.period.fortnight && r.period.year == run.period.year
        }) {
            return Err(PayrollError::DuplicateRun {
                fortnight: run.period.fortnight,
                year: run.period.year,
            });
        }
        runs.push(run.clone());
        Ok(run)
    }

    fn get(&self, id: Uuid) -> Option<PayrollRun> {
        self.runs.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    fn find_by_period(&self, fortnight: u32, year: i32) -> Option<PayrollRun> {
        self.runs
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.period.fortnight == fortnight && r.period.year == year)
            .cloned()
    }

    fn is_period_processed(&self, fortnight: u32, year: i32) -> bool {
        self.runs.lock().unwrap().iter().any(|r| {
            r.period.fortnight == fortnight
                && r.period.year == year
                && r.status == PayrollStatus::Processed
        })
    }

    fn update_if_status(
        &self,
        run: PayrollRun,
        expected: PayrollStatus,
    ) -> PayrollResult<PayrollRun> {
        let mut runs = self.runs.lock().unwrap();

        if run.status == PayrollStatus::Processed {
            let other_processed = runs.iter().any(|r| {
                r.id != run.id
                    && r.period.fortnight == run.period.fortnight
                    && r.period.year == run.period.year
                    && r.status == PayrollStatus::Processed
            });
            if other_processed {
                return Err(PayrollError::PeriodAlreadyProcessed {
                    fortnight: run.period.fortnight,
                    year: run.period.year,
                });
            }
        }

        let stored = runs
            .iter_mut()
            .find(|r| r.id == run.id)
            .ok_or(PayrollError::RunNotFound { id: run.id })?;
        if stored.status != expected {
            return Err(PayrollError::InvalidTransition {
                action: "update",
                status: stored.status,
            });
        }
        *stored = run.clone();
        Ok(run)
    }

    fn list(&self) -> Vec<PayrollRun> {
        let mut runs = self.runs.lock().unwrap().clone();
        runs.sort_by(|a, b| {
            (b.period.year, b.period.fortnight).cmp(&(a.period.year, a.period.fortnight))
        });
        runs
    }
}
