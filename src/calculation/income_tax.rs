//! Progressive monthly income tax.
//!
//! Taxable income is converted to UTM, the bracket containing it is
//! selected, and the tax is `(units x factor - subtracted) x UTM`, floored at
//! zero and rounded to whole pesos.

use rust_decimal::Decimal;

use super::round_pesos;
use crate::models::{AuditStep, LineCategory, PayslipLineItem, TaxBracket};

/// The result of the income tax calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The income tax line (zero when no bracket applies).
    pub line: PayslipLineItem,
    /// The taxable income expressed in UTM.
    pub income_in_units: Decimal,
    /// The bracket used, if any.
    pub bracket: Option<TaxBracket>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket whose `[from, to)` range contains `units`.
pub fn find_bracket(brackets: &[TaxBracket], units: Decimal) -> Option<&TaxBracket> {
    brackets.iter().find(|bracket| bracket.contains(units))
}

/// Calculates the month's income tax.
///
/// An income below the lowest bracket (only possible when deductions exceed
/// the taxable base) pays no tax.
///
/// # Arguments
///
/// * `taxable_income` - Taxable base minus pension, health and unemployment
/// * `monthly_tax_unit_value` - Pesos per UTM for the period
/// * `brackets` - The year's bracket table
/// * `step_number` - The step number for the breakdown
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_income_tax;
/// use payslip_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket {
///         from_units: Decimal::ZERO,
///         to_units: Some(Decimal::new(135, 1)),
///         factor: Decimal::ZERO,
///         subtracted_units: Decimal::ZERO,
///     },
///     TaxBracket {
///         from_units: Decimal::new(135, 1),
///         to_units: None,
///         factor: Decimal::new(4, 2),
///         subtracted_units: Decimal::new(54, 2),
///     },
/// ];
///
/// let result = calculate_income_tax(Decimal::from(809_600), Decimal::from(67_294), &brackets, 1);
/// assert_eq!(result.line.amount, Decimal::ZERO);
/// ```
pub fn calculate_income_tax(
    taxable_income: Decimal,
    monthly_tax_unit_value: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> IncomeTaxResult {
    let income_in_units = taxable_income / monthly_tax_unit_value;

    let Some(bracket) = find_bracket(brackets, income_in_units) else {
        return IncomeTaxResult {
            line: PayslipLineItem::new(LineCategory::IncomeTax, "Impuesto único", Decimal::ZERO),
            income_in_units,
            bracket: None,
            audit_step: AuditStep {
                step_number,
                rule_id: "income_tax".to_string(),
                rule_name: "Income Tax".to_string(),
                input: serde_json::json!({
                    "taxable_income": taxable_income.normalize().to_string(),
                    "monthly_tax_unit_value": monthly_tax_unit_value.normalize().to_string()
                }),
                output: serde_json::json!({
                    "income_in_units": income_in_units.round_dp(4).normalize().to_string(),
                    "bracket_found": false,
                    "amount": "0"
                }),
                reasoning: format!(
                    "Taxable income of {} UTM is below the lowest bracket; no tax due",
                    income_in_units.round_dp(4).normalize()
                ),
            },
        };
    };

    let tax_in_units = income_in_units * bracket.factor - bracket.subtracted_units;
    let amount = round_pesos((tax_in_units * monthly_tax_unit_value).max(Decimal::ZERO));

    let range = match bracket.to_units {
        Some(to) => format!("{}-{} UTM", bracket.from_units.normalize(), to.normalize()),
        None => format!("over {} UTM", bracket.from_units.normalize()),
    };

    IncomeTaxResult {
        line: PayslipLineItem::new(LineCategory::IncomeTax, "Impuesto único", amount),
        income_in_units,
        bracket: Some(bracket.clone()),
        audit_step: AuditStep {
            step_number,
            rule_id: "income_tax".to_string(),
            rule_name: "Income Tax".to_string(),
            input: serde_json::json!({
                "taxable_income": taxable_income.normalize().to_string(),
                "monthly_tax_unit_value": monthly_tax_unit_value.normalize().to_string()
            }),
            output: serde_json::json!({
                "income_in_units": income_in_units.round_dp(4).normalize().to_string(),
                "bracket_found": true,
                "factor": bracket.factor.normalize().to_string(),
                "subtracted_units": bracket.subtracted_units.normalize().to_string(),
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{} UTM falls in bracket {}: ({} x {} - {}) x ${} = ${}",
                income_in_units.round_dp(4).normalize(),
                range,
                income_in_units.round_dp(4).normalize(),
                bracket.factor.normalize(),
                bracket.subtracted_units.normalize(),
                monthly_tax_unit_value.normalize(),
                amount.normalize()
            ),
        },
    }
}
