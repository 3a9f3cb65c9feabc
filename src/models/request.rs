//! Approved employee request views.
//!
//! The engine reads approved overtime and leave requests from the request
//! ledger collaborator. Overtime requests carry an inclusion flag on the
//! ledger side so that each grant is paid exactly once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An approved overtime request not yet included in any payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee who worked the overtime.
    pub employee_id: String,
    /// The date the overtime was worked; selects the applicable multiplier
    /// (weekend rate on Saturday/Sunday, holiday rate when flagged).
    pub date: NaiveDate,
    /// The approved overtime hours.
    pub hours: Decimal,
    /// Whether the overtime fell on a public holiday.
    #[serde(default)]
    pub public_holiday: bool,
}

/// An approved leave request overlapping a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee on leave.
    pub employee_id: String,
    /// The number of leave days approved.
    pub total_days: Decimal,
}
