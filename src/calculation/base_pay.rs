//! Proportional base pay.
//!
//! Base pay is the agreed monthly salary prorated by days worked over a
//! 30-day payroll month.

use rust_decimal::Decimal;

use super::round_pesos;
use crate::models::{AuditStep, FULL_MONTH_DAYS, LineCategory, PayslipLineItem};

/// The result of the base pay calculation.
#[derive(Debug, Clone)]
pub struct BasePayResult {
    /// The proportional base pay line.
    pub line: PayslipLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the base pay for the days worked.
///
/// A full 30-day month pays the salary unchanged. Any other day count pays
/// `round(salary / 30 * days_worked)`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_base_pay;
/// use rust_decimal::Decimal;
///
/// let result = calculate_base_pay(Decimal::from(800_000), 15, 1);
/// assert_eq!(result.line.amount, Decimal::from(400_000));
/// ```
pub fn calculate_base_pay(
    base_monthly_salary: Decimal,
    days_worked: u32,
    step_number: u32,
) -> BasePayResult {
    if days_worked == FULL_MONTH_DAYS {
        let audit_step = AuditStep {
            step_number,
            rule_id: "base_pay".to_string(),
            rule_name: "Proportional Base Pay".to_string(),
            input: serde_json::json!({
                "base_monthly_salary": base_monthly_salary.normalize().to_string(),
                "days_worked": days_worked
            }),
            output: serde_json::json!({
                "amount": base_monthly_salary.normalize().to_string(),
                "prorated": false
            }),
            reasoning: format!(
                "Full month worked: base pay is the monthly salary ${}",
                base_monthly_salary.normalize()
            ),
        };

        return BasePayResult {
            line: PayslipLineItem::new(
                LineCategory::BaseSalary,
                "Sueldo base",
                base_monthly_salary,
            ),
            audit_step,
        };
    }

    // Multiply before dividing so the 1/30 never gets truncated
    let amount = round_pesos(
        base_monthly_salary * Decimal::from(days_worked) / Decimal::from(FULL_MONTH_DAYS),
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pay".to_string(),
        rule_name: "Proportional Base Pay".to_string(),
        input: serde_json::json!({
            "base_monthly_salary": base_monthly_salary.normalize().to_string(),
            "days_worked": days_worked
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "prorated": true
        }),
        reasoning: format!(
            "${} / {} x {} days = ${}",
            base_monthly_salary.normalize(),
            FULL_MONTH_DAYS,
            days_worked,
            amount.normalize()
        ),
    };

    BasePayResult {
        line: PayslipLineItem::new(
            LineCategory::BaseSalary,
            format!("Sueldo base ({} días)", days_worked),
            amount,
        ),
        audit_step,
    }
}
