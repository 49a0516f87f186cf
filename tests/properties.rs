//! Property tests for payslip computation.
//!
//! Every property runs against the shipped January 2025 indicators.

use std::sync::OnceLock;

use proptest::prelude::*;
use rust_decimal::Decimal;

use payslip_engine::calculation::{
    LEGAL_GRATIFICATION_CAP_WAGES, calculate_income_tax, compute_payslip,
};
use payslip_engine::config::IndicatorStore;
use payslip_engine::models::{
    ContractType, FixedAllowance, Gratification, HealthPlan, LineCategory, PeriodVariableInputs,
    ResolvedIndicators, VoluntaryDeduction, WorkerCompensationFacts,
};
use payslip_engine::resolver::IndicatorSource;

fn store() -> &'static IndicatorStore {
    static STORE: OnceLock<IndicatorStore> = OnceLock::new();
    STORE.get_or_init(|| IndicatorStore::load("./config/indicators").expect("Failed to load config"))
}

fn january_indicators(contract_type: ContractType) -> ResolvedIndicators {
    store()
        .period_indicators(2025, 1)
        .expect("January 2025 is configured")
        .resolve_for_worker("Capital", contract_type, None)
        .expect("Capital has a published rate")
}

fn contract_type_strategy() -> impl Strategy<Value = ContractType> {
    prop_oneof![
        Just(ContractType::Indefinite),
        Just(ContractType::FixedTerm),
        Just(ContractType::ProjectBased),
    ]
}

fn health_plan_strategy() -> impl Strategy<Value = HealthPlan> {
    prop_oneof![
        Just(HealthPlan::Public),
        (0u32..=80).prop_map(|tenths| HealthPlan::Private {
            additional_units: Decimal::new(tenths as i64, 1),
        }),
    ]
}

fn gratification_strategy() -> impl Strategy<Value = Gratification> {
    prop_oneof![
        Just(Gratification::Legal25Percent),
        (0u64..=3_000_000).prop_map(|amount| Gratification::FixedAmount {
            amount: Decimal::from(amount),
        }),
    ]
}

prop_compose! {
    fn worker_strategy()(
        salary in 100_000u64..=20_000_000,
        gratification in gratification_strategy(),
        health_plan in health_plan_strategy(),
        contract_type in contract_type_strategy(),
        allowances in proptest::collection::vec(0u64..=200_000, 0..3),
    ) -> WorkerCompensationFacts {
        WorkerCompensationFacts {
            worker_id: "12345678-9".to_string(),
            base_monthly_salary: Decimal::from(salary),
            gratification,
            pension_fund: "Capital".to_string(),
            pension_fund_contribution_rate: Decimal::new(1144, 2),
            health_plan,
            contract_type,
            fixed_allowances: allowances
                .into_iter()
                .enumerate()
                .map(|(i, amount)| FixedAllowance {
                    name: format!("Asignación {}", i + 1),
                    amount: Decimal::from(amount),
                })
                .collect(),
        }
    }
}

prop_compose! {
    fn variable_strategy()(
        days_worked in 0u32..=31,
        half_hours_50 in 0i64..=80,
        half_hours_100 in 0i64..=40,
        bonus in 0u64..=500_000,
        deductions in proptest::collection::vec(0u64..=300_000, 0..3),
    ) -> PeriodVariableInputs {
        PeriodVariableInputs {
            days_worked,
            overtime_hours_50: Decimal::new(half_hours_50 * 5, 1),
            overtime_hours_100: Decimal::new(half_hours_100 * 5, 1),
            variable_bonus: Decimal::from(bonus),
            voluntary_deductions: deductions
                .into_iter()
                .map(|amount| VoluntaryDeduction {
                    name: "Anticipo".to_string(),
                    amount: Decimal::from(amount),
                })
                .collect(),
        }
    }
}

proptest! {
    #[test]
    fn net_pay_is_earnings_minus_deductions(
        worker in worker_strategy(),
        variable in variable_strategy(),
    ) {
        let indicators = january_indicators(worker.contract_type);
        let payslip = compute_payslip(&worker, &variable, &indicators);

        prop_assert_eq!(payslip.net_pay, payslip.total_earnings - payslip.total_deductions);
        let earnings: Decimal = payslip.earnings.iter().map(|line| line.amount).sum();
        let deductions: Decimal = payslip.deductions.iter().map(|line| line.amount).sum();
        prop_assert_eq!(payslip.total_earnings, earnings);
        prop_assert_eq!(payslip.total_deductions, deductions);
    }

    #[test]
    fn identical_inputs_give_identical_payslips(
        worker in worker_strategy(),
        variable in variable_strategy(),
    ) {
        let indicators = january_indicators(worker.contract_type);

        let first = compute_payslip(&worker, &variable, &indicators);
        let second = compute_payslip(&worker, &variable, &indicators);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn full_month_pays_the_salary(worker in worker_strategy()) {
        let indicators = january_indicators(worker.contract_type);
        let payslip = compute_payslip(&worker, &PeriodVariableInputs::full_month(), &indicators);

        prop_assert_eq!(
            payslip.total_for(LineCategory::BaseSalary),
            worker.base_monthly_salary
        );
    }

    #[test]
    fn legal_gratification_never_exceeds_cap(
        mut worker in worker_strategy(),
        variable in variable_strategy(),
        minimum_wage in 100_000u64..=1_000_000,
    ) {
        worker.gratification = Gratification::Legal25Percent;
        let mut indicators = january_indicators(worker.contract_type);
        indicators.minimum_wage = Decimal::from(minimum_wage);
        let payslip = compute_payslip(&worker, &variable, &indicators);

        let ceiling = indicators.minimum_wage * LEGAL_GRATIFICATION_CAP_WAGES;
        prop_assert!(payslip.total_for(LineCategory::Gratification) <= ceiling);
    }

    #[test]
    fn taxable_base_excludes_allowances_and_bonus(
        worker in worker_strategy(),
        variable in variable_strategy(),
    ) {
        let indicators = january_indicators(worker.contract_type);
        let payslip = compute_payslip(&worker, &variable, &indicators);

        let taxable = payslip.total_for(LineCategory::BaseSalary)
            + payslip.total_for(LineCategory::Overtime)
            + payslip.total_for(LineCategory::Gratification);
        prop_assert_eq!(payslip.taxable_base, taxable);

        let mut without_extras = worker.clone();
        without_extras.fixed_allowances.clear();
        let mut no_bonus = variable.clone();
        no_bonus.variable_bonus = Decimal::ZERO;
        let baseline = compute_payslip(&without_extras, &no_bonus, &indicators);
        prop_assert_eq!(payslip.taxable_base, baseline.taxable_base);
        prop_assert_eq!(payslip.taxable_income, baseline.taxable_income);
    }

    #[test]
    fn income_tax_is_monotone(low in 0u64..=30_000_000, step in 0u64..=5_000_000) {
        let indicators = january_indicators(ContractType::Indefinite);
        let high = low + step;

        let low_tax = calculate_income_tax(
            Decimal::from(low),
            indicators.monthly_tax_unit_value,
            &indicators.tax_brackets,
            1,
        );
        let high_tax = calculate_income_tax(
            Decimal::from(high),
            indicators.monthly_tax_unit_value,
            &indicators.tax_brackets,
            1,
        );

        prop_assert!(low_tax.line.amount >= Decimal::ZERO);
        prop_assert!(high_tax.line.amount >= low_tax.line.amount);
    }
}
