//! Per-employee pay computation.
//!
//! Combines attendance-derived pro-rata basic pay, approved overtime, and
//! statutory deductions into a complete [`PayrollDetail`]. The computation
//! is pure given its inputs: the returned [`EmployeeComputation`] carries
//! the ids of the overtime requests it consumed, and the orchestrator marks
//! them included only after the run persists successfully.

use chrono::{Datelike, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::calculation::tax::per_period_tax;
use crate::config::EffectiveConfiguration;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, OvertimeRequest, PayPeriod, PayrollDetail};
use crate::ports::{AttendanceLedger, RequestLedger};

/// The result of computing one employee's pay for one period.
#[derive(Debug, Clone)]
pub struct EmployeeComputation {
    /// The complete pay breakdown (with `run_id` not yet assigned).
    pub detail: PayrollDetail,
    /// Overtime request ids consumed by this computation. Each must be
    /// marked included exactly once, after the owning run commits.
    pub consumed_overtime: Vec<Uuid>,
}

/// Computes the pay breakdown for one employee in one period.
///
/// Policy, in order:
///
/// 1. Per-period basic = annual basic salary / fortnights per year.
/// 2. Days worked come from the attendance ledger; zero recorded days is
///    read as "no attendance data" and falls back to full attendance.
///    Absence of data is not absence from work.
/// 3. Daily rate = per-period basic / working days in the period; hourly
///    rate = daily rate / standard hours per day.
/// 4. Pro-rata basic = daily rate * days worked.
/// 5. Overtime pay sums approved, not-yet-included requests, each at the
///    multiplier its date attracts (holiday, weekend, or normal).
/// 6. Gross = pro-rata basic + overtime. No allowances are synthesized.
/// 7. Superannuation (both sides) is computed on pro-rata *basic*.
/// 8. Tax is computed on annualized gross, divided back to the period.
/// 9. Late deduction = late count * configured amount.
/// 10. Totals and net pay follow the identities on [`PayrollDetail`].
pub fn compute_for_employee(
    employee: &Employee,
    period: &PayPeriod,
    total_working_days: u32,
    effective: &EffectiveConfiguration,
    attendance: &dyn AttendanceLedger,
    requests: &dyn RequestLedger,
) -> PayrollResult<EmployeeComputation> {
    let payroll = &effective.payroll;
    let tax_config = &effective.tax;

    if total_working_days == 0 {
        return Err(PayrollError::CalculationError {
            employee_id: employee.id.clone(),
            message: "period has no working days".to_string(),
        });
    }
    if payroll.standard_hours_per_day <= Decimal::ZERO {
        return Err(PayrollError::CalculationError {
            employee_id: employee.id.clone(),
            message: "standard hours per day must be positive".to_string(),
        });
    }

    let fortnights_per_year = Decimal::from(payroll.fortnights_per_year.max(1));
    let period_basic = employee.annual_basic_salary / fortnights_per_year;

    // Attendance fallback: zero recorded present days means no data.
    let recorded_days = attendance.count_present_days(&employee.id, period.start, period.end);
    let days_worked = if recorded_days == 0 {
        total_working_days
    } else {
        recorded_days
    };
    let late_count = attendance.count_late_days(&employee.id, period.start, period.end);

    let daily_rate = period_basic / Decimal::from(total_working_days);
    let hourly_rate = daily_rate / payroll.standard_hours_per_day;
    let pro_rata_basic = daily_rate * Decimal::from(days_worked);

    let overtime_requests =
        requests.approved_overtime_not_included(&employee.id, period.start, period.end);
    let mut overtime_pay = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut consumed_overtime = Vec::with_capacity(overtime_requests.len());
    for request in &overtime_requests {
        overtime_pay += hourly_rate * request.hours * overtime_multiplier(payroll, request);
        overtime_hours += request.hours;
        consumed_overtime.push(request.id);
    }

    let leave_days: Decimal = requests
        .approved_leave_in_period(&employee.id, period.start, period.end)
        .iter()
        .map(|l| l.total_days)
        .sum();

    let round = |value: Decimal| -> Decimal {
        if payroll.round_net_pay {
            value.round_dp_with_strategy(
                payroll.rounding_precision,
                RoundingStrategy::MidpointAwayFromZero,
            )
        } else {
            value
        }
    };

    let pro_rata_basic = round(pro_rata_basic);
    let overtime_pay = round(overtime_pay);
    let gross_salary = pro_rata_basic + overtime_pay;

    let resident = employee.residency_or(tax_config.default_resident);
    let projected_annual_income = gross_salary * Decimal::from(tax_config.fortnights_per_year.max(1));
    let tax = per_period_tax(
        projected_annual_income,
        tax_config,
        resident,
        payroll.round_net_pay.then_some(payroll.rounding_precision),
    );

    let super_employee = round(pro_rata_basic * tax_config.super_employee_rate);
    let super_employer = round(pro_rata_basic * tax_config.super_employer_rate);
    let late_deduction = round(Decimal::from(late_count) * payroll.late_deduction_amount);

    let mut detail = PayrollDetail {
        id: Uuid::new_v4(),
        run_id: Uuid::nil(),
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        basic_pay: pro_rata_basic,
        overtime_pay,
        tax,
        super_employee,
        super_employer,
        late_deduction,
        other_deductions: Decimal::ZERO,
        taxable_income: gross_salary,
        projected_annual_income,
        tax_resident: resident,
        total_working_days,
        days_worked,
        late_count,
        approved_overtime_hours: overtime_hours,
        leave_days,
        gross_salary,
        total_deductions: Decimal::ZERO,
        net_pay: Decimal::ZERO,
        cost_to_company: Decimal::ZERO,
    };
    detail.compute_totals();

    Ok(EmployeeComputation {
        detail,
        consumed_overtime,
    })
}

/// Selects the overtime multiplier a request's date attracts.
fn overtime_multiplier(
    payroll: &crate::config::PayrollConfiguration,
    request: &OvertimeRequest,
) -> Decimal {
    if request.public_holiday {
        payroll.holiday_overtime_multiplier
    } else if matches!(request.date.weekday(), Weekday::Sat | Weekday::Sun) {
        payroll.weekend_overtime_multiplier
    } else {
        payroll.overtime_multiplier
    }
}
