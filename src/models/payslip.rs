//! Payslip result models.
//!
//! This module contains the [`PayslipResult`] type and its associated
//! structures: categorized line items, the step-by-step breakdown and
//! warnings raised while computing a payslip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a payslip line.
///
/// Categories are the single source of truth for what a line means.
/// Recalculation logic matches on them, never on display labels.
///
/// # Example
///
/// ```
/// use payslip_engine::models::LineCategory;
///
/// assert!(LineCategory::Gratification.is_taxable());
/// assert!(!LineCategory::Allowance.is_taxable());
/// assert!(LineCategory::IncomeTax.is_system_derived());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    /// Proportional base salary.
    BaseSalary,
    /// Overtime pay (one line per premium tier).
    Overtime,
    /// Legal or contractual gratification.
    Gratification,
    /// Pension fund (AFP) contribution.
    Pension,
    /// Health plan contribution.
    Health,
    /// Unemployment insurance, worker share.
    Unemployment,
    /// Monthly income tax.
    IncomeTax,
    /// Fixed non-taxable allowance.
    Allowance,
    /// Anything else.
    ///
    /// Covers both the variable bonus (an earning) and voluntary deductions.
    /// The two are told apart by the list they sit in, `earnings` or
    /// `deductions`, never by label.
    Other,
}

impl LineCategory {
    /// Returns true for earnings that make up the taxable base ("imponible").
    pub fn is_taxable(&self) -> bool {
        matches!(
            self,
            LineCategory::BaseSalary | LineCategory::Overtime | LineCategory::Gratification
        )
    }

    /// Returns true for lines the engine derives and a user may not edit.
    ///
    /// Base salary, allowances and other lines are entered by the
    /// accountant and stay editable when a saved payslip is recalculated.
    pub fn is_system_derived(&self) -> bool {
        matches!(
            self,
            LineCategory::Overtime
                | LineCategory::Gratification
                | LineCategory::Pension
                | LineCategory::Health
                | LineCategory::Unemployment
                | LineCategory::IncomeTax
        )
    }
}

/// A single line on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLineItem {
    /// What the line represents.
    pub category: LineCategory,
    /// Human-readable label shown on the payslip.
    pub label: String,
    /// Amount in whole pesos.
    pub amount: Decimal,
}

impl PayslipLineItem {
    /// Creates a new line item.
    pub fn new(category: LineCategory, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category,
            label: label.into(),
            amount,
        }
    }
}

/// A single step in the payslip breakdown.
///
/// Each step captures the input, output, and reasoning of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the computation.
    pub reasoning: String,
}

/// A warning raised during calculation.
///
/// Warnings never stop a calculation but should be reviewed before the
/// period is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The computed payslip for one worker and one period.
///
/// Holds no identifiers or timestamps, so identical inputs always produce
/// an identical result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipResult {
    /// Earning lines in payslip order.
    pub earnings: Vec<PayslipLineItem>,
    /// Deduction lines in payslip order.
    pub deductions: Vec<PayslipLineItem>,
    /// Sum of the taxable earnings.
    pub taxable_base: Decimal,
    /// Taxable base minus pension, health and unemployment deductions.
    pub taxable_income: Decimal,
    /// Sum of all earnings.
    pub total_earnings: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Total earnings minus total deductions.
    pub net_pay: Decimal,
    /// Step-by-step breakdown of the calculation.
    pub breakdown: Vec<AuditStep>,
    /// Warnings raised during the calculation.
    pub warnings: Vec<AuditWarning>,
}

impl PayslipResult {
    /// Returns the lines of both sides that a user may edit.
    pub fn editable_lines(&self) -> impl Iterator<Item = &PayslipLineItem> {
        self.earnings
            .iter()
            .chain(self.deductions.iter())
            .filter(|line| !line.category.is_system_derived())
    }

    /// Sums every line (earning or deduction) with the given category.
    pub fn total_for(&self, category: LineCategory) -> Decimal {
        self.earnings
            .iter()
            .chain(self.deductions.iter())
            .filter(|line| line.category == category)
            .map(|line| line.amount)
            .sum()
    }
}
