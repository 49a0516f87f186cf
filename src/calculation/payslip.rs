//! Payslip assembly.
//!
//! [`compute_payslip`] is the single entry point of the calculator. It runs
//! every step in order and assembles the itemized [`PayslipResult`].

use rust_decimal::Decimal;
use tracing::debug;

use super::{
    calculate_base_pay, calculate_gratification, calculate_health, calculate_income_tax,
    calculate_overtime, calculate_pension, calculate_unemployment,
};
use crate::models::{
    AuditStep, AuditWarning, LineCategory, PayslipLineItem, PayslipResult, PeriodVariableInputs,
    ResolvedIndicators, WorkerCompensationFacts,
};

/// Computes a worker's payslip for one period.
///
/// The function is pure and deterministic: it performs no I/O and identical
/// inputs always produce an identical result. Inputs are assumed to have
/// passed [`WorkerCompensationFacts::validate`] and
/// [`PeriodVariableInputs::validate`].
///
/// # Steps
///
/// 1. Proportional base pay
/// 2. Overtime at 50% and 100% premiums
/// 3. Gratification (fixed, or legal 25% capped at 4.75 minimum wages)
/// 4. Taxable base from the taxable earning categories only
/// 5. Fixed allowances and the variable bonus (non-taxable)
/// 6. Pension, health and unemployment against the taxable base
/// 7. Income tax on the taxable base minus those deductions
/// 8. Voluntary deductions, totals and net pay
pub fn compute_payslip(
    facts: &WorkerCompensationFacts,
    variable: &PeriodVariableInputs,
    indicators: &ResolvedIndicators,
) -> PayslipResult {
    let mut earnings: Vec<PayslipLineItem> = Vec::new();
    let mut deductions: Vec<PayslipLineItem> = Vec::new();
    let mut breakdown: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    if indicators.pension_rate_used_fallback {
        warnings.push(AuditWarning {
            code: "PENSION_RATE_FALLBACK".to_string(),
            message: format!(
                "No published rate for pension fund '{}' in {:02}/{}; used the worker's default rate of {}%",
                indicators.pension_fund,
                indicators.month,
                indicators.year,
                indicators.pension_rate.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    // Taxable earnings
    let base_pay = calculate_base_pay(facts.base_monthly_salary, variable.days_worked, step_number);
    let base_pay_amount = base_pay.line.amount;
    earnings.push(base_pay.line);
    breakdown.push(base_pay.audit_step);
    step_number += 1;

    let overtime = calculate_overtime(
        facts.base_monthly_salary,
        variable.overtime_hours_50,
        variable.overtime_hours_100,
        step_number,
    );
    step_number += overtime.audit_steps.len() as u32;
    earnings.extend(overtime.lines);
    breakdown.extend(overtime.audit_steps);

    let gratification = calculate_gratification(
        &facts.gratification,
        base_pay_amount,
        indicators.minimum_wage,
        step_number,
    );
    if gratification.cap_applied {
        warnings.push(AuditWarning {
            code: "GRATIFICATION_CAPPED".to_string(),
            message: format!(
                "Legal gratification capped at {}",
                gratification.line.amount.normalize()
            ),
            severity: "low".to_string(),
        });
    }
    earnings.push(gratification.line);
    breakdown.push(gratification.audit_step);
    step_number += 1;

    let taxable_base: Decimal = earnings
        .iter()
        .filter(|line| line.category.is_taxable())
        .map(|line| line.amount)
        .sum();

    // Non-taxable earnings
    for allowance in &facts.fixed_allowances {
        earnings.push(PayslipLineItem::new(
            LineCategory::Allowance,
            allowance.name.clone(),
            allowance.amount,
        ));
    }
    if variable.variable_bonus > Decimal::ZERO {
        earnings.push(PayslipLineItem::new(
            LineCategory::Other,
            "Bono variable",
            variable.variable_bonus,
        ));
    }
    let total_earnings: Decimal = earnings.iter().map(|line| line.amount).sum();

    breakdown.push(AuditStep {
        step_number,
        rule_id: "taxable_base".to_string(),
        rule_name: "Taxable Base".to_string(),
        input: serde_json::json!({
            "taxable_lines": earnings
                .iter()
                .filter(|line| line.category.is_taxable())
                .count(),
            "non_taxable_lines": earnings
                .iter()
                .filter(|line| !line.category.is_taxable())
                .count()
        }),
        output: serde_json::json!({
            "taxable_base": taxable_base.normalize().to_string(),
            "total_earnings": total_earnings.normalize().to_string()
        }),
        reasoning: format!(
            "Base pay, overtime and gratification make a taxable base of ${}; allowances and bonus bring total earnings to ${}",
            taxable_base.normalize(),
            total_earnings.normalize()
        ),
    });
    step_number += 1;

    // Social-security deductions
    let pension = calculate_pension(
        taxable_base,
        &indicators.pension_fund,
        indicators.pension_rate,
        step_number,
    );
    step_number += 1;
    let health = calculate_health(
        taxable_base,
        &facts.health_plan,
        indicators.unit_of_account_value,
        step_number,
    );
    step_number += 1;
    let unemployment = calculate_unemployment(
        taxable_base,
        facts.contract_type,
        indicators.unemployment,
        step_number,
    );
    step_number += 1;

    let taxable_income =
        taxable_base - pension.line.amount - health.line.amount - unemployment.line.amount;

    for deduction in [pension, health, unemployment] {
        deductions.push(deduction.line);
        breakdown.push(deduction.audit_step);
    }

    let income_tax = calculate_income_tax(
        taxable_income,
        indicators.monthly_tax_unit_value,
        &indicators.tax_brackets,
        step_number,
    );
    deductions.push(income_tax.line);
    breakdown.push(income_tax.audit_step);
    step_number += 1;

    for voluntary in &variable.voluntary_deductions {
        deductions.push(PayslipLineItem::new(
            LineCategory::Other,
            voluntary.name.clone(),
            voluntary.amount,
        ));
    }

    let total_deductions: Decimal = deductions.iter().map(|line| line.amount).sum();
    let net_pay = total_earnings - total_deductions;

    breakdown.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "total_earnings": total_earnings.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} = ${}",
            total_earnings.normalize(),
            total_deductions.normalize(),
            net_pay.normalize()
        ),
    });

    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!("Deductions exceed earnings by {}", (-net_pay).normalize()),
            severity: "high".to_string(),
        });
    }

    debug!(
        worker_id = %facts.worker_id,
        year = indicators.year,
        month = indicators.month,
        taxable_base = %taxable_base,
        total_earnings = %total_earnings,
        total_deductions = %total_deductions,
        net_pay = %net_pay,
        "Payslip computed"
    );

    PayslipResult {
        earnings,
        deductions,
        taxable_base,
        taxable_income,
        total_earnings,
        total_deductions,
        net_pay,
        breakdown,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContractType, FixedAllowance, Gratification, HealthPlan, TaxBracket, UnemploymentRates,
        VoluntaryDeduction,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(from: &str, to: Option<&str>, factor: &str, subtracted: &str) -> TaxBracket {
        TaxBracket {
            from_units: dec(from),
            to_units: to.map(dec),
            factor: dec(factor),
            subtracted_units: dec(subtracted),
        }
    }

    fn create_test_indicators() -> ResolvedIndicators {
        ResolvedIndicators {
            year: 2025,
            month: 1,
            unit_of_account_value: dec("37000"),
            monthly_tax_unit_value: dec("67294"),
            minimum_wage: dec("500000"),
            pension_fund: "Capital".to_string(),
            pension_rate: dec("11.44"),
            pension_rate_used_fallback: false,
            unemployment: UnemploymentRates {
                worker_percent: dec("0.6"),
                employer_percent: dec("2.4"),
            },
            tax_brackets: vec![
                bracket("0", Some("13.5"), "0", "0"),
                bracket("13.5", Some("30"), "0.04", "0.54"),
                bracket("30", Some("50"), "0.08", "1.74"),
                bracket("50", None, "0.135", "4.49"),
            ],
        }
    }

    fn create_test_facts() -> WorkerCompensationFacts {
        WorkerCompensationFacts {
            worker_id: "12345678-9".to_string(),
            base_monthly_salary: dec("800000"),
            gratification: Gratification::Legal25Percent,
            pension_fund: "Capital".to_string(),
            pension_fund_contribution_rate: dec("11.44"),
            health_plan: HealthPlan::Public,
            contract_type: ContractType::Indefinite,
            fixed_allowances: vec![],
        }
    }

    fn line_amount(lines: &[PayslipLineItem], category: LineCategory) -> Decimal {
        lines
            .iter()
            .filter(|line| line.category == category)
            .map(|line| line.amount)
            .sum()
    }

    /// PS-001: indefinite contract, public health, full month
    #[test]
    fn test_indefinite_public_full_month() {
        let result = compute_payslip(
            &create_test_facts(),
            &PeriodVariableInputs::full_month(),
            &create_test_indicators(),
        );

        assert_eq!(line_amount(&result.earnings, LineCategory::BaseSalary), dec("800000"));
        assert_eq!(line_amount(&result.earnings, LineCategory::Gratification), dec("200000"));
        assert_eq!(result.taxable_base, dec("1000000"));
        assert_eq!(result.total_earnings, dec("1000000"));

        assert_eq!(line_amount(&result.deductions, LineCategory::Pension), dec("114400"));
        assert_eq!(line_amount(&result.deductions, LineCategory::Health), dec("70000"));
        assert_eq!(line_amount(&result.deductions, LineCategory::Unemployment), dec("6000"));
        assert_eq!(result.taxable_income, dec("809600"));
        assert_eq!(line_amount(&result.deductions, LineCategory::IncomeTax), Decimal::ZERO);

        assert_eq!(result.total_deductions, dec("190400"));
        assert_eq!(result.net_pay, dec("809600"));
        assert!(result.warnings.is_empty());
    }

    /// PS-002: fixed-term contract withholds 3%
    #[test]
    fn test_fixed_term_contract() {
        let mut facts = create_test_facts();
        facts.contract_type = ContractType::FixedTerm;
        let mut indicators = create_test_indicators();
        indicators.unemployment = UnemploymentRates {
            worker_percent: dec("3.0"),
            employer_percent: dec("0"),
        };

        let result = compute_payslip(&facts, &PeriodVariableInputs::full_month(), &indicators);

        assert_eq!(line_amount(&result.deductions, LineCategory::Unemployment), dec("30000"));
        assert_eq!(result.taxable_income, dec("785600"));
        assert_eq!(result.net_pay, dec("785600"));
    }

    /// PS-003: private health plan adds UF premium
    #[test]
    fn test_private_health_plan() {
        let mut facts = create_test_facts();
        facts.health_plan = HealthPlan::Private {
            additional_units: dec("3"),
        };

        let result = compute_payslip(
            &facts,
            &PeriodVariableInputs::full_month(),
            &create_test_indicators(),
        );

        assert_eq!(line_amount(&result.deductions, LineCategory::Health), dec("181000"));
        assert_eq!(result.taxable_income, dec("698600"));
    }

    /// PS-004: allowances and bonus never enter the taxable base
    #[test]
    fn test_allowances_and_bonus_are_not_taxable() {
        let mut facts = create_test_facts();
        facts.fixed_allowances = vec![
            FixedAllowance {
                name: "Colación".to_string(),
                amount: dec("40000"),
            },
            FixedAllowance {
                name: "Movilización".to_string(),
                amount: dec("30000"),
            },
        ];
        let mut variable = PeriodVariableInputs::full_month();
        variable.variable_bonus = dec("150000");

        let result = compute_payslip(&facts, &variable, &create_test_indicators());

        assert_eq!(result.taxable_base, dec("1000000"));
        assert_eq!(result.total_earnings, dec("1220000"));
        assert_eq!(line_amount(&result.deductions, LineCategory::Pension), dec("114400"));
        assert_eq!(line_amount(&result.earnings, LineCategory::Allowance), dec("70000"));
        assert_eq!(line_amount(&result.earnings, LineCategory::Other), dec("150000"));
        assert_eq!(result.net_pay, dec("1029600"));
    }

    /// PS-005: overtime enters the taxable base and can push income into a bracket
    #[test]
    fn test_overtime_with_income_tax() {
        let mut facts = create_test_facts();
        facts.base_monthly_salary = dec("2000000");
        let mut variable = PeriodVariableInputs::full_month();
        variable.overtime_hours_50 = dec("10");

        let result = compute_payslip(&facts, &variable, &create_test_indicators());

        // Hourly 50%: 2,000,000 x 28 x 1.5 / 5,280 = 15,909.09 -> 15,909; x 10 = 159,090
        assert_eq!(line_amount(&result.earnings, LineCategory::Overtime), dec("159090"));
        // 2,000,000 + 159,090 + 500,000
        assert_eq!(result.taxable_base, dec("2659090"));
        // Pension 304,200 (11.44% of 2,659,090 = 304,199.896), health 186,136, unemployment 15,955
        assert_eq!(line_amount(&result.deductions, LineCategory::Pension), dec("304200"));
        assert_eq!(line_amount(&result.deductions, LineCategory::Health), dec("186136"));
        assert_eq!(line_amount(&result.deductions, LineCategory::Unemployment), dec("15955"));
        assert_eq!(result.taxable_income, dec("2152799"));
        // 2,152,799 x 0.08 - 1.74 x 67,294 = 55,132.36
        assert_eq!(line_amount(&result.deductions, LineCategory::IncomeTax), dec("55132"));
        assert_eq!(result.net_pay, result.total_earnings - result.total_deductions);
    }

    /// PS-006: voluntary deductions are summed separately
    #[test]
    fn test_voluntary_deductions() {
        let mut variable = PeriodVariableInputs::full_month();
        variable.voluntary_deductions = vec![
            VoluntaryDeduction {
                name: "Anticipo".to_string(),
                amount: dec("100000"),
            },
            VoluntaryDeduction {
                name: "Préstamo caja".to_string(),
                amount: dec("25000"),
            },
        ];

        let result = compute_payslip(&create_test_facts(), &variable, &create_test_indicators());

        assert_eq!(line_amount(&result.deductions, LineCategory::Other), dec("125000"));
        assert_eq!(result.taxable_income, dec("809600"));
        assert_eq!(result.total_deductions, dec("315400"));
        assert_eq!(result.net_pay, dec("684600"));
    }

    /// PS-007: zero days with a private plan goes negative and warns
    #[test]
    fn test_zero_days_private_plan_warns_negative_net() {
        let mut facts = create_test_facts();
        facts.health_plan = HealthPlan::Private {
            additional_units: dec("3"),
        };
        let mut variable = PeriodVariableInputs::full_month();
        variable.days_worked = 0;

        let result = compute_payslip(&facts, &variable, &create_test_indicators());

        assert_eq!(result.taxable_base, Decimal::ZERO);
        assert_eq!(result.taxable_income, dec("-111000"));
        assert_eq!(line_amount(&result.deductions, LineCategory::IncomeTax), Decimal::ZERO);
        assert_eq!(result.net_pay, dec("-111000"));
        assert!(result.warnings.iter().any(|w| w.code == "NEGATIVE_NET_PAY"));
    }

    #[test]
    fn test_fallback_rate_is_flagged() {
        let mut indicators = create_test_indicators();
        indicators.pension_rate_used_fallback = true;

        let result = compute_payslip(
            &create_test_facts(),
            &PeriodVariableInputs::full_month(),
            &indicators,
        );

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "PENSION_RATE_FALLBACK");
        assert!(result.warnings[0].message.contains("Capital"));
    }

    #[test]
    fn test_capped_gratification_is_flagged() {
        let mut facts = create_test_facts();
        facts.base_monthly_salary = dec("12000000");

        let result = compute_payslip(
            &facts,
            &PeriodVariableInputs::full_month(),
            &create_test_indicators(),
        );

        assert_eq!(line_amount(&result.earnings, LineCategory::Gratification), dec("2375000"));
        assert!(result.warnings.iter().any(|w| w.code == "GRATIFICATION_CAPPED"));
    }

    #[test]
    fn test_line_order() {
        let mut facts = create_test_facts();
        facts.fixed_allowances = vec![FixedAllowance {
            name: "Colación".to_string(),
            amount: dec("40000"),
        }];
        let mut variable = PeriodVariableInputs::full_month();
        variable.overtime_hours_50 = dec("2");
        variable.variable_bonus = dec("10000");
        variable.voluntary_deductions = vec![VoluntaryDeduction {
            name: "Anticipo".to_string(),
            amount: dec("1000"),
        }];

        let result = compute_payslip(&facts, &variable, &create_test_indicators());

        let earning_categories: Vec<LineCategory> =
            result.earnings.iter().map(|line| line.category).collect();
        assert_eq!(
            earning_categories,
            vec![
                LineCategory::BaseSalary,
                LineCategory::Overtime,
                LineCategory::Gratification,
                LineCategory::Allowance,
                LineCategory::Other,
            ]
        );

        let deduction_categories: Vec<LineCategory> =
            result.deductions.iter().map(|line| line.category).collect();
        assert_eq!(
            deduction_categories,
            vec![
                LineCategory::Pension,
                LineCategory::Health,
                LineCategory::Unemployment,
                LineCategory::IncomeTax,
                LineCategory::Other,
            ]
        );
    }

    #[test]
    fn test_breakdown_steps_are_numbered_in_order() {
        let mut variable = PeriodVariableInputs::full_month();
        variable.overtime_hours_50 = dec("1");
        variable.overtime_hours_100 = dec("1");

        let result = compute_payslip(&create_test_facts(), &variable, &create_test_indicators());

        let rule_ids: Vec<&str> = result
            .breakdown
            .iter()
            .map(|step| step.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "base_pay",
                "overtime_50",
                "overtime_100",
                "gratification",
                "taxable_base",
                "pension",
                "health",
                "unemployment",
                "income_tax",
                "net_pay",
            ]
        );

        let numbers: Vec<u32> = result.breakdown.iter().map(|step| step.step_number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let facts = create_test_facts();
        let variable = PeriodVariableInputs::full_month();
        let indicators = create_test_indicators();

        let first = compute_payslip(&facts, &variable, &indicators);
        let second = compute_payslip(&facts, &variable, &indicators);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_largest_valid_inputs_compute() {
        use crate::models::{MAX_ADDITIONAL_UNITS, MAX_OVERTIME_HOURS, MAX_PESO_AMOUNT};

        let mut facts = create_test_facts();
        facts.base_monthly_salary = MAX_PESO_AMOUNT;
        facts.health_plan = HealthPlan::Private {
            additional_units: MAX_ADDITIONAL_UNITS,
        };
        facts.fixed_allowances.push(FixedAllowance {
            name: "Colación".to_string(),
            amount: MAX_PESO_AMOUNT,
        });
        let variable = PeriodVariableInputs {
            days_worked: 31,
            overtime_hours_50: MAX_OVERTIME_HOURS,
            overtime_hours_100: MAX_OVERTIME_HOURS,
            variable_bonus: MAX_PESO_AMOUNT,
            voluntary_deductions: vec![VoluntaryDeduction {
                name: "Anticipo".to_string(),
                amount: MAX_PESO_AMOUNT,
            }],
        };
        assert!(facts.validate().is_ok());
        assert!(variable.validate().is_ok());

        let result = compute_payslip(&facts, &variable, &create_test_indicators());

        assert!(result.taxable_base > MAX_PESO_AMOUNT);
        assert_eq!(result.net_pay, result.total_earnings - result.total_deductions);
    }
}
