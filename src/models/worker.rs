//! Worker compensation model and related types.
//!
//! This module defines the contractual facts that drive a worker's payslip:
//! salary, gratification mode, pension fund, health plan, contract type and
//! fixed non-taxable allowances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest peso amount accepted for any single monetary input (one trillion).
pub const MAX_PESO_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest additional private health premium accepted, in units of account.
pub const MAX_ADDITIONAL_UNITS: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// The type of employment contract.
///
/// Determines the unemployment-insurance rate and which party bears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Open-ended contract ("plazo indefinido").
    Indefinite,
    /// Fixed-term contract ("plazo fijo").
    FixedTerm,
    /// Contract for a specific project or task ("por obra o faena").
    ProjectBased,
}

impl ContractType {
    /// Returns the snake_case name used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Indefinite => "indefinite",
            ContractType::FixedTerm => "fixed_term",
            ContractType::ProjectBased => "project_based",
        }
    }
}

/// How the worker's gratification is determined.
///
/// A fixed amount and the legal 25% mode are mutually exclusive, so the
/// fixed amount only exists on its own variant.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Gratification;
///
/// let legal: Gratification = serde_json::from_str(r#"{"mode": "legal_25_percent"}"#).unwrap();
/// assert_eq!(legal, Gratification::Legal25Percent);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Gratification {
    /// A contractually fixed monthly amount, paid unchanged.
    FixedAmount {
        /// The fixed monthly gratification.
        amount: Decimal,
    },
    /// 25% of the proportional base pay, capped at 4.75 minimum wages.
    #[serde(rename = "legal_25_percent")]
    Legal25Percent,
}

/// The worker's health insurance plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HealthPlan {
    /// Public health fund (FONASA): 7% of the taxable base only.
    Public,
    /// Private health insurer (ISAPRE): 7% plus an agreed add-on.
    Private {
        /// Additional monthly premium in UF (unit of account), not pesos.
        additional_units: Decimal,
    },
}

/// A fixed, non-taxable allowance paid every month (meal, transport, travel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAllowance {
    /// Display name of the allowance (e.g., "Colación").
    pub name: String,
    /// Monthly amount in pesos.
    pub amount: Decimal,
}

/// Per-worker contractual inputs for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCompensationFacts {
    /// Identifier of the worker (RUT or internal id).
    pub worker_id: String,
    /// Agreed monthly salary for a full 30-day month.
    pub base_monthly_salary: Decimal,
    /// Gratification mode.
    pub gratification: Gratification,
    /// Name of the worker's pension fund (AFP).
    pub pension_fund: String,
    /// The fund's commission-inclusive contribution percent, used when the
    /// period has no published rate for the fund.
    pub pension_fund_contribution_rate: Decimal,
    /// Health plan.
    pub health_plan: HealthPlan,
    /// Contract type.
    pub contract_type: ContractType,
    /// Fixed non-taxable allowances.
    #[serde(default)]
    pub fixed_allowances: Vec<FixedAllowance>,
}

impl WorkerCompensationFacts {
    /// Checks the input contract the calculator relies on.
    ///
    /// Returns the first violation found as [`EngineError::InvalidInput`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.worker_id.trim().is_empty() {
            return Err(invalid("worker_id", "must not be empty"));
        }
        if self.base_monthly_salary <= Decimal::ZERO {
            return Err(invalid("base_monthly_salary", "must be positive"));
        }
        if self.base_monthly_salary > MAX_PESO_AMOUNT {
            return Err(invalid("base_monthly_salary", &exceeds(MAX_PESO_AMOUNT)));
        }
        if let Gratification::FixedAmount { amount } = &self.gratification {
            if *amount < Decimal::ZERO {
                return Err(invalid("gratification.amount", "must not be negative"));
            }
            if *amount > MAX_PESO_AMOUNT {
                return Err(invalid("gratification.amount", &exceeds(MAX_PESO_AMOUNT)));
            }
        }
        if self.pension_fund.trim().is_empty() {
            return Err(invalid("pension_fund", "must not be empty"));
        }
        if self.pension_fund_contribution_rate < Decimal::ZERO
            || self.pension_fund_contribution_rate > Decimal::ONE_HUNDRED
        {
            return Err(invalid(
                "pension_fund_contribution_rate",
                "must be a percentage between 0 and 100",
            ));
        }
        if let HealthPlan::Private { additional_units } = &self.health_plan {
            if *additional_units < Decimal::ZERO {
                return Err(invalid(
                    "health_plan.additional_units",
                    "must not be negative",
                ));
            }
            if *additional_units > MAX_ADDITIONAL_UNITS {
                return Err(invalid(
                    "health_plan.additional_units",
                    &exceeds(MAX_ADDITIONAL_UNITS),
                ));
            }
        }
        for allowance in &self.fixed_allowances {
            if allowance.amount < Decimal::ZERO {
                return Err(invalid(
                    "fixed_allowances",
                    &format!("'{}' must not be negative", allowance.name),
                ));
            }
            if allowance.amount > MAX_PESO_AMOUNT {
                return Err(invalid(
                    "fixed_allowances",
                    &format!("'{}' {}", allowance.name, exceeds(MAX_PESO_AMOUNT)),
                ));
            }
        }
        Ok(())
    }
}

pub(crate) fn exceeds(limit: Decimal) -> String {
    format!("must not exceed {}", limit)
}

pub(crate) fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}
