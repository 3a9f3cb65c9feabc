//! Per-employee payroll detail model.
//!
//! A [`PayrollDetail`] is the complete earnings and deductions breakdown for
//! one employee in one payroll run. Details are created during computation
//! and are never mutated once the owning run reaches PROCESSED.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The earnings, deductions, and attendance breakdown for one employee in
/// one payroll run.
///
/// The computed totals satisfy two identities exactly (at the configured
/// rounding precision):
///
/// - `gross_salary == basic_pay + overtime_pay`
/// - `net_pay == gross_salary - total_deductions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDetail {
    /// Unique identifier for this detail.
    pub id: Uuid,
    /// The run this detail belongs to.
    pub run_id: Uuid,
    /// The employee this detail is for.
    pub employee_id: String,
    /// The employee's name at computation time, for payslip display.
    pub employee_name: String,

    // Earnings
    /// Pro-rata basic pay for the period (daily rate times days worked).
    pub basic_pay: Decimal,
    /// Overtime pay from approved overtime requests.
    pub overtime_pay: Decimal,

    // Statutory deductions
    /// Progressive income tax withheld for the period.
    pub tax: Decimal,
    /// Employee superannuation contribution (on basic pay).
    pub super_employee: Decimal,
    /// Employer superannuation contribution (on basic pay).
    pub super_employer: Decimal,

    // Other deductions
    /// Deduction for late arrivals (late count times configured amount).
    pub late_deduction: Decimal,
    /// Any other configured deduction lines.
    pub other_deductions: Decimal,

    // Tax computation inputs
    /// Fortnightly taxable income (equals gross salary).
    pub taxable_income: Decimal,
    /// Annualized income used for the slab calculation.
    pub projected_annual_income: Decimal,
    /// Whether the employee was treated as a tax resident.
    pub tax_resident: bool,

    // Attendance inputs
    /// Working days (Mon-Fri) in the period.
    pub total_working_days: u32,
    /// Days the employee actually worked (or the full-attendance fallback).
    pub days_worked: u32,
    /// Number of late arrivals recorded in the period.
    pub late_count: u32,
    /// Approved overtime hours included in this detail.
    pub approved_overtime_hours: Decimal,
    /// Approved leave days falling in the period.
    pub leave_days: Decimal,

    // Computed totals
    /// Gross salary: basic pay plus overtime pay.
    pub gross_salary: Decimal,
    /// Sum of tax, employee superannuation, late and other deductions.
    pub total_deductions: Decimal,
    /// Net pay: gross salary minus total deductions.
    pub net_pay: Decimal,
    /// Cost to company: gross salary plus employer superannuation.
    pub cost_to_company: Decimal,
}

impl PayrollDetail {
    /// Recomputes the derived totals from the component fields.
    ///
    /// Employer superannuation is not deducted from the employee; it only
    /// contributes to cost-to-company.
    pub fn compute_totals(&mut self) {
        self.gross_salary = self.basic_pay + self.overtime_pay;
        self.taxable_income = self.gross_salary;
        self.total_deductions =
            self.tax + self.super_employee + self.late_deduction + self.other_deductions;
        self.net_pay = self.gross_salary - self.total_deductions;
        self.cost_to_company = self.gross_salary + self.super_employer;
    }
}
