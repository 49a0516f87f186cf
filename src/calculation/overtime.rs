//! Overtime pay calculation.
//!
//! ## Rate Structure
//!
//! The ordinary hourly value is derived from the monthly salary over a
//! 44-hour week: `salary / 30 * 28 / 176`. Overtime is paid in two tiers:
//! - 50% premium: hourly value x 1.5
//! - 100% premium: hourly value x 2.0
//!
//! The hourly value never depends on days worked.

use rust_decimal::Decimal;

use super::round_pesos;
use crate::models::{AuditStep, FULL_MONTH_DAYS, LineCategory, PayslipLineItem};

/// Days in the four weeks that make up the ordinary-hour month.
pub const ORDINARY_WEEKS_DAYS: u32 = 28;

/// Ordinary hours in those four weeks (4 x 44).
pub const ORDINARY_MONTHLY_HOURS: u32 = 176;

/// Multiplier for overtime paid with a 50% premium.
pub const OVERTIME_FACTOR_50: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Multiplier for overtime paid with a 100% premium.
pub const OVERTIME_FACTOR_100: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// The result of the overtime calculation.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// One line per tier with hours (0, 1 or 2 lines).
    pub lines: Vec<PayslipLineItem>,
    /// One audit step per tier with hours.
    pub audit_steps: Vec<AuditStep>,
    /// Total overtime pay.
    pub total: Decimal,
}

/// Returns the rounded hourly overtime rate for a premium factor.
///
/// Computes `round(salary / 30 * 28 / 176 * factor)`, multiplying first so
/// the intermediate divisions never truncate.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::{OVERTIME_FACTOR_50, overtime_hourly_rate};
/// use rust_decimal::Decimal;
///
/// let rate = overtime_hourly_rate(Decimal::from(800_000), OVERTIME_FACTOR_50);
/// assert_eq!(rate, Decimal::from(6364));
/// ```
pub fn overtime_hourly_rate(base_monthly_salary: Decimal, premium_factor: Decimal) -> Decimal {
    let numerator = base_monthly_salary * Decimal::from(ORDINARY_WEEKS_DAYS) * premium_factor;
    let denominator = Decimal::from(FULL_MONTH_DAYS * ORDINARY_MONTHLY_HOURS);
    round_pesos(numerator / denominator)
}

/// Calculates overtime pay for both premium tiers.
///
/// # Arguments
///
/// * `base_monthly_salary` - The agreed monthly salary (not the prorated pay)
/// * `hours_50` - Hours paid with a 50% premium
/// * `hours_100` - Hours paid with a 100% premium
/// * `step_number_start` - The starting step number for the breakdown
pub fn calculate_overtime(
    base_monthly_salary: Decimal,
    hours_50: Decimal,
    hours_100: Decimal,
    step_number_start: u32,
) -> OvertimeResult {
    let mut lines = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;

    let tiers = [
        ("overtime_50", "Overtime 50%", "Horas extra 50%", hours_50, OVERTIME_FACTOR_50),
        ("overtime_100", "Overtime 100%", "Horas extra 100%", hours_100, OVERTIME_FACTOR_100),
    ];

    for (rule_id, rule_name, label, hours, factor) in tiers {
        if hours <= Decimal::ZERO {
            continue;
        }

        let rate = overtime_hourly_rate(base_monthly_salary, factor);
        let amount = round_pesos(hours * rate);

        audit_steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "base_monthly_salary": base_monthly_salary.normalize().to_string(),
                "hours": hours.normalize().to_string()
            }),
            output: serde_json::json!({
                "multiplier": factor.normalize().to_string(),
                "hourly_rate": rate.normalize().to_string(),
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "${} / {} x {} / {} x {} = ${} per hour; {} hours x ${} = ${}",
                base_monthly_salary.normalize(),
                FULL_MONTH_DAYS,
                ORDINARY_WEEKS_DAYS,
                ORDINARY_MONTHLY_HOURS,
                factor.normalize(),
                rate.normalize(),
                hours.normalize(),
                rate.normalize(),
                amount.normalize()
            ),
        });
        lines.push(PayslipLineItem::new(
            LineCategory::Overtime,
            format!("{} ({} h)", label, hours.normalize()),
            amount,
        ));
        step_number += 1;
    }

    let total = lines.iter().map(|line| line.amount).sum();

    OvertimeResult {
        lines,
        audit_steps,
        total,
    }
}
