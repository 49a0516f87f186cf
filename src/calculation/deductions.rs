//! Statutory social-security deductions.
//!
//! Pension, health and unemployment insurance are all computed against the
//! taxable base. Allowances and the variable bonus never reach this module.

use rust_decimal::Decimal;

use super::{percent_of, round_pesos};
use crate::models::{
    AuditStep, ContractType, HealthPlan, LineCategory, PayslipLineItem, UnemploymentRates,
};

/// Baseline health contribution, in percent of the taxable base.
pub const HEALTH_BASE_PERCENT: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// The result of a single deduction calculation.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The deduction line.
    pub line: PayslipLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the pension fund (AFP) contribution.
///
/// `round(taxable_base * pension_rate / 100)`.
pub fn calculate_pension(
    taxable_base: Decimal,
    pension_fund: &str,
    pension_rate: Decimal,
    step_number: u32,
) -> DeductionResult {
    let amount = percent_of(taxable_base, pension_rate);

    DeductionResult {
        line: PayslipLineItem::new(
            LineCategory::Pension,
            format!("AFP {} ({}%)", pension_fund, pension_rate.normalize()),
            amount,
        ),
        audit_step: AuditStep {
            step_number,
            rule_id: "pension".to_string(),
            rule_name: "Pension Fund Contribution".to_string(),
            input: serde_json::json!({
                "taxable_base": taxable_base.normalize().to_string(),
                "pension_fund": pension_fund,
                "pension_rate": pension_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{}% of ${} = ${}",
                pension_rate.normalize(),
                taxable_base.normalize(),
                amount.normalize()
            ),
        },
    }
}

/// Calculates the health plan contribution.
///
/// Both plans pay 7% of the taxable base. Private plans (ISAPRE) add the
/// agreed premium in UF converted at the period's UF value.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_health;
/// use payslip_engine::models::HealthPlan;
/// use rust_decimal::Decimal;
///
/// let plan = HealthPlan::Private { additional_units: Decimal::from(3) };
/// let result = calculate_health(Decimal::from(1_000_000), &plan, Decimal::from(37_000), 1);
/// assert_eq!(result.line.amount, Decimal::from(181_000));
/// ```
pub fn calculate_health(
    taxable_base: Decimal,
    health_plan: &HealthPlan,
    unit_of_account_value: Decimal,
    step_number: u32,
) -> DeductionResult {
    let baseline = percent_of(taxable_base, HEALTH_BASE_PERCENT);

    match health_plan {
        HealthPlan::Public => DeductionResult {
            line: PayslipLineItem::new(LineCategory::Health, "Salud Fonasa 7%", baseline),
            audit_step: AuditStep {
                step_number,
                rule_id: "health".to_string(),
                rule_name: "Health Contribution".to_string(),
                input: serde_json::json!({
                    "taxable_base": taxable_base.normalize().to_string(),
                    "plan": "public"
                }),
                output: serde_json::json!({
                    "baseline": baseline.normalize().to_string(),
                    "additional": "0",
                    "amount": baseline.normalize().to_string()
                }),
                reasoning: format!(
                    "7% of ${} = ${}",
                    taxable_base.normalize(),
                    baseline.normalize()
                ),
            },
        },
        HealthPlan::Private { additional_units } => {
            let additional = round_pesos(*additional_units * unit_of_account_value);
            let amount = baseline + additional;

            DeductionResult {
                line: PayslipLineItem::new(
                    LineCategory::Health,
                    format!("Salud Isapre 7% + {} UF", additional_units.normalize()),
                    amount,
                ),
                audit_step: AuditStep {
                    step_number,
                    rule_id: "health".to_string(),
                    rule_name: "Health Contribution".to_string(),
                    input: serde_json::json!({
                        "taxable_base": taxable_base.normalize().to_string(),
                        "plan": "private",
                        "additional_units": additional_units.normalize().to_string(),
                        "unit_of_account_value": unit_of_account_value.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "baseline": baseline.normalize().to_string(),
                        "additional": additional.normalize().to_string(),
                        "amount": amount.normalize().to_string()
                    }),
                    reasoning: format!(
                        "7% of ${} = ${}, plus {} UF x ${} = ${}; total ${}",
                        taxable_base.normalize(),
                        baseline.normalize(),
                        additional_units.normalize(),
                        unit_of_account_value.normalize(),
                        additional.normalize(),
                        amount.normalize()
                    ),
                },
            }
        }
    }
}

/// Calculates the worker's share of unemployment insurance.
///
/// The employer share is recorded in the breakdown but never reaches the
/// payslip; see [`employer_unemployment_contribution`].
pub fn calculate_unemployment(
    taxable_base: Decimal,
    contract_type: ContractType,
    rates: UnemploymentRates,
    step_number: u32,
) -> DeductionResult {
    let amount = percent_of(taxable_base, rates.worker_percent);

    DeductionResult {
        line: PayslipLineItem::new(
            LineCategory::Unemployment,
            format!("Seguro de cesantía ({}%)", rates.worker_percent.normalize()),
            amount,
        ),
        audit_step: AuditStep {
            step_number,
            rule_id: "unemployment".to_string(),
            rule_name: "Unemployment Insurance".to_string(),
            input: serde_json::json!({
                "taxable_base": taxable_base.normalize().to_string(),
                "contract_type": contract_type.as_str(),
                "worker_percent": rates.worker_percent.normalize().to_string(),
                "employer_percent": rates.employer_percent.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{} contract: worker pays {}% of ${} = ${}",
                contract_type.as_str(),
                rates.worker_percent.normalize(),
                taxable_base.normalize(),
                amount.normalize()
            ),
        },
    }
}

/// Returns the employer's unemployment-insurance contribution.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::employer_unemployment_contribution;
/// use payslip_engine::models::UnemploymentRates;
/// use rust_decimal::Decimal;
///
/// let rates = UnemploymentRates {
///     worker_percent: Decimal::new(6, 1),
///     employer_percent: Decimal::new(24, 1),
/// };
/// let amount = employer_unemployment_contribution(Decimal::from(1_000_000), rates);
/// assert_eq!(amount, Decimal::from(24_000));
/// ```
pub fn employer_unemployment_contribution(
    taxable_base: Decimal,
    rates: UnemploymentRates,
) -> Decimal {
    percent_of(taxable_base, rates.employer_percent)
}
