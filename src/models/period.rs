//! Per-period variable inputs.
//!
//! This module contains the [`PeriodVariableInputs`] entered by the
//! accountant for a worker in a given month: days worked, overtime hours,
//! the discretionary bonus and any voluntary deductions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::worker::{MAX_PESO_AMOUNT, exceeds, invalid};
use crate::error::EngineResult;

/// The number of days in a full payroll month.
pub const FULL_MONTH_DAYS: u32 = 30;

/// The maximum number of days that can be reported for a month.
pub const MAX_DAYS_WORKED: u32 = 31;

/// The maximum overtime hours per tier for a month (24 x 31).
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// A deduction the worker agreed to, such as a salary advance or a loan instalment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoluntaryDeduction {
    /// Display name (e.g., "Anticipo").
    pub name: String,
    /// Amount in pesos.
    pub amount: Decimal,
}

/// Per-period, per-worker entries supplied at calculation time.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PeriodVariableInputs;
///
/// let inputs = PeriodVariableInputs::full_month();
/// assert_eq!(inputs.days_worked, 30);
/// assert!(inputs.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodVariableInputs {
    /// Days worked in the month (0-31); anything other than 30 prorates base pay.
    pub days_worked: u32,
    /// Overtime hours paid with a 50% premium.
    #[serde(default)]
    pub overtime_hours_50: Decimal,
    /// Overtime hours paid with a 100% premium.
    #[serde(default)]
    pub overtime_hours_100: Decimal,
    /// Discretionary, non-taxable bonus.
    #[serde(default)]
    pub variable_bonus: Decimal,
    /// Voluntary deductions reported on their own lines.
    #[serde(default)]
    pub voluntary_deductions: Vec<VoluntaryDeduction>,
}

impl PeriodVariableInputs {
    /// Inputs for a full 30-day month with no overtime, bonus or deductions.
    pub fn full_month() -> Self {
        Self {
            days_worked: FULL_MONTH_DAYS,
            overtime_hours_50: Decimal::ZERO,
            overtime_hours_100: Decimal::ZERO,
            variable_bonus: Decimal::ZERO,
            voluntary_deductions: vec![],
        }
    }

    /// Checks the input contract the calculator relies on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.days_worked > MAX_DAYS_WORKED {
            return Err(invalid(
                "days_worked",
                &format!("must be between 0 and {}", MAX_DAYS_WORKED),
            ));
        }
        for (field, hours) in [
            ("overtime_hours_50", self.overtime_hours_50),
            ("overtime_hours_100", self.overtime_hours_100),
        ] {
            if hours < Decimal::ZERO {
                return Err(invalid(field, "must not be negative"));
            }
            if hours > MAX_OVERTIME_HOURS {
                return Err(invalid(field, &exceeds(MAX_OVERTIME_HOURS)));
            }
        }
        if self.variable_bonus < Decimal::ZERO {
            return Err(invalid("variable_bonus", "must not be negative"));
        }
        if self.variable_bonus > MAX_PESO_AMOUNT {
            return Err(invalid("variable_bonus", &exceeds(MAX_PESO_AMOUNT)));
        }
        for deduction in &self.voluntary_deductions {
            if deduction.amount < Decimal::ZERO {
                return Err(invalid(
                    "voluntary_deductions",
                    &format!("'{}' must not be negative", deduction.name),
                ));
            }
            if deduction.amount > MAX_PESO_AMOUNT {
                return Err(invalid(
                    "voluntary_deductions",
                    &format!("'{}' {}", deduction.name, exceeds(MAX_PESO_AMOUNT)),
                ));
            }
        }
        Ok(())
    }
}
