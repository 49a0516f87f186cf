//! Gratification calculation functionality.
//!
//! Workers receive either a contractually fixed gratification or the legal
//! monthly gratification: 25% of base pay, capped at 4.75 minimum wages.
//! The cap is truncated to whole pesos so it never exceeds the legal ceiling.

use rust_decimal::{Decimal, RoundingStrategy};

use super::round_pesos;
use crate::models::{AuditStep, Gratification, LineCategory, PayslipLineItem};

/// Share of base pay paid as legal gratification.
pub const LEGAL_GRATIFICATION_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Cap on the legal gratification, in minimum wages.
pub const LEGAL_GRATIFICATION_CAP_WAGES: Decimal = Decimal::from_parts(475, 0, 0, false, 2);

/// The result of the gratification calculation.
#[derive(Debug, Clone)]
pub struct GratificationResult {
    /// The gratification line.
    pub line: PayslipLineItem,
    /// Whether the legal cap reduced the amount.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the month's gratification.
///
/// # Arguments
///
/// * `gratification` - The worker's gratification mode
/// * `base_pay` - The proportional base pay for the month
/// * `minimum_wage` - The period's minimum wage, which sets the legal cap
/// * `step_number` - The step number for the breakdown
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_gratification;
/// use payslip_engine::models::Gratification;
/// use rust_decimal::Decimal;
///
/// let result = calculate_gratification(
///     &Gratification::Legal25Percent,
///     Decimal::from(800_000),
///     Decimal::from(500_000),
///     1,
/// );
/// assert_eq!(result.line.amount, Decimal::from(200_000));
/// assert!(!result.cap_applied);
/// ```
pub fn calculate_gratification(
    gratification: &Gratification,
    base_pay: Decimal,
    minimum_wage: Decimal,
    step_number: u32,
) -> GratificationResult {
    match gratification {
        Gratification::FixedAmount { amount } => GratificationResult {
            line: PayslipLineItem::new(LineCategory::Gratification, "Gratificación", *amount),
            cap_applied: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "gratification".to_string(),
                rule_name: "Gratification".to_string(),
                input: serde_json::json!({
                    "mode": "fixed_amount",
                    "fixed_amount": amount.normalize().to_string()
                }),
                output: serde_json::json!({
                    "amount": amount.normalize().to_string(),
                    "cap_applied": false
                }),
                reasoning: format!("Contractual fixed gratification of ${}", amount.normalize()),
            },
        },
        Gratification::Legal25Percent => {
            let uncapped = round_pesos(base_pay * LEGAL_GRATIFICATION_RATE);
            let cap = (minimum_wage * LEGAL_GRATIFICATION_CAP_WAGES)
                .round_dp_with_strategy(0, RoundingStrategy::ToZero);
            let (amount, cap_applied) = if uncapped > cap {
                (cap, true)
            } else {
                (uncapped, false)
            };

            let reasoning = if cap_applied {
                format!(
                    "25% of ${} = ${} exceeds the cap of {} x ${} = ${}; paying the cap",
                    base_pay.normalize(),
                    uncapped.normalize(),
                    LEGAL_GRATIFICATION_CAP_WAGES.normalize(),
                    minimum_wage.normalize(),
                    cap.normalize()
                )
            } else {
                format!(
                    "25% of ${} = ${} (cap {} x ${} = ${})",
                    base_pay.normalize(),
                    uncapped.normalize(),
                    LEGAL_GRATIFICATION_CAP_WAGES.normalize(),
                    minimum_wage.normalize(),
                    cap.normalize()
                )
            };

            GratificationResult {
                line: PayslipLineItem::new(
                    LineCategory::Gratification,
                    "Gratificación legal",
                    amount,
                ),
                cap_applied,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "gratification".to_string(),
                    rule_name: "Gratification".to_string(),
                    input: serde_json::json!({
                        "mode": "legal_25_percent",
                        "base_pay": base_pay.normalize().to_string(),
                        "minimum_wage": minimum_wage.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "amount": amount.normalize().to_string(),
                        "cap": cap.normalize().to_string(),
                        "cap_applied": cap_applied
                    }),
                    reasoning,
                },
            }
        }
    }
}
