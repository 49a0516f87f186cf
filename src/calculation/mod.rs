//! Calculation logic for the Payslip Engine.
//!
//! This module contains every payslip step: peso rounding, proportional base
//! pay, overtime, gratification, the statutory deductions, progressive income
//! tax, the payslip assembly that chains them, and batch payroll runs.

mod base_pay;
mod deductions;
mod gratification;
mod income_tax;
mod overtime;
mod payroll_run;
mod payslip;
mod rounding;

pub use base_pay::{BasePayResult, calculate_base_pay};
pub use deductions::{
    DeductionResult, HEALTH_BASE_PERCENT, calculate_health, calculate_pension,
    calculate_unemployment, employer_unemployment_contribution,
};
pub use gratification::{
    GratificationResult, LEGAL_GRATIFICATION_CAP_WAGES, LEGAL_GRATIFICATION_RATE,
    calculate_gratification,
};
pub use income_tax::{IncomeTaxResult, calculate_income_tax, find_bracket};
pub use overtime::{
    ORDINARY_MONTHLY_HOURS, ORDINARY_WEEKS_DAYS, OVERTIME_FACTOR_50, OVERTIME_FACTOR_100,
    OvertimeResult, calculate_overtime, overtime_hourly_rate,
};
pub use payroll_run::{PayrollEntry, PayrollRun, PayrollRunTotals, WorkerPayslip, run_payroll};
pub use payslip::compute_payslip;
pub use rounding::{percent_of, round_pesos};
