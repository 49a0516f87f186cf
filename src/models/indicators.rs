//! Monthly economic indicators.
//!
//! This module contains [`PeriodIndicators`], the government-published values
//! for one month, and [`ResolvedIndicators`], the same values narrowed down to
//! the scalars that apply to a single worker.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContractType;
use crate::error::{EngineError, EngineResult};

/// One row of the monthly income-tax table ("impuesto único de segunda categoría").
///
/// Bounds are expressed in UTM (monthly tax units). A bracket covers
/// `[from_units, to_units)`; the last bracket has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound in UTM.
    pub from_units: Decimal,
    /// Exclusive upper bound in UTM; `None` means open-ended.
    pub to_units: Option<Decimal>,
    /// Marginal factor applied to the income in UTM.
    pub factor: Decimal,
    /// Amount subtracted after applying the factor, in UTM.
    pub subtracted_units: Decimal,
}

impl TaxBracket {
    /// Returns true if `units` falls inside this bracket.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::TaxBracket;
    /// use rust_decimal::Decimal;
    ///
    /// let bracket = TaxBracket {
    ///     from_units: Decimal::new(135, 1),
    ///     to_units: Some(Decimal::from(30)),
    ///     factor: Decimal::new(4, 2),
    ///     subtracted_units: Decimal::new(54, 2),
    /// };
    /// assert!(bracket.contains(Decimal::new(135, 1)));
    /// assert!(!bracket.contains(Decimal::from(30)));
    /// ```
    pub fn contains(&self, units: Decimal) -> bool {
        units >= self.from_units && self.to_units.is_none_or(|to| units < to)
    }
}

/// Unemployment-insurance rates for one contract type, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnemploymentRates {
    /// Percent of the taxable base withheld from the worker.
    pub worker_percent: Decimal,
    /// Percent of the taxable base paid by the employer.
    pub employer_percent: Decimal,
}

/// Unemployment-insurance rates for every contract type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnemploymentRateTable {
    /// Rates for indefinite contracts.
    pub indefinite: UnemploymentRates,
    /// Rates for fixed-term contracts.
    pub fixed_term: UnemploymentRates,
    /// Rates for project-based contracts.
    pub project_based: UnemploymentRates,
}

impl UnemploymentRateTable {
    /// Returns the rates that apply to `contract_type`.
    pub fn for_contract(&self, contract_type: ContractType) -> UnemploymentRates {
        match contract_type {
            ContractType::Indefinite => self.indefinite,
            ContractType::FixedTerm => self.fixed_term,
            ContractType::ProjectBased => self.project_based,
        }
    }
}

/// Government-published values for one year and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodIndicators {
    /// The period year.
    pub year: i32,
    /// The period month (1-12).
    pub month: u32,
    /// Pesos per UF (inflation-indexed unit of account).
    pub unit_of_account_value: Decimal,
    /// Pesos per UTM (monthly tax unit).
    pub monthly_tax_unit_value: Decimal,
    /// Monthly minimum wage in pesos.
    pub minimum_wage: Decimal,
    /// Worker contribution percent (including commission) by pension fund name.
    pub pension_fund_rates: BTreeMap<String, Decimal>,
    /// Unemployment-insurance rates by contract type.
    pub unemployment_rates: UnemploymentRateTable,
    /// The year's income-tax table, ascending and contiguous from 0 UTM.
    pub tax_brackets: Vec<TaxBracket>,
}

impl PeriodIndicators {
    /// Looks up a pension fund's published rate, ignoring case and
    /// surrounding whitespace.
    pub fn pension_rate(&self, fund: &str) -> Option<Decimal> {
        let wanted = fund.trim();
        self.pension_fund_rates
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, rate)| *rate)
    }

    /// Checks that the indicators can be used for a calculation.
    ///
    /// Unit values and the minimum wage must be positive, rates must be
    /// percentages, and the bracket table must start at 0 UTM, ascend without
    /// gaps or overlaps, and end with an open bracket.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(self.invalid(format!("month {} is out of range", self.month)));
        }
        if self.unit_of_account_value <= Decimal::ZERO {
            return Err(self.invalid("unit_of_account_value must be positive"));
        }
        if self.monthly_tax_unit_value <= Decimal::ZERO {
            return Err(self.invalid("monthly_tax_unit_value must be positive"));
        }
        if self.minimum_wage <= Decimal::ZERO {
            return Err(self.invalid("minimum_wage must be positive"));
        }
        for (fund, rate) in &self.pension_fund_rates {
            if *rate < Decimal::ZERO || *rate > Decimal::ONE_HUNDRED {
                return Err(self.invalid(format!("pension rate for '{}' is not a percentage", fund)));
            }
        }
        for contract_type in [
            ContractType::Indefinite,
            ContractType::FixedTerm,
            ContractType::ProjectBased,
        ] {
            let rates = self.unemployment_rates.for_contract(contract_type);
            if rates.worker_percent < Decimal::ZERO || rates.employer_percent < Decimal::ZERO {
                return Err(self.invalid(format!(
                    "unemployment rates for {} must not be negative",
                    contract_type.as_str()
                )));
            }
        }
        self.validate_brackets()
    }

    fn validate_brackets(&self) -> EngineResult<()> {
        let Some(first) = self.tax_brackets.first() else {
            return Err(self.invalid("tax bracket table is empty"));
        };
        if first.from_units != Decimal::ZERO {
            return Err(self.invalid(format!(
                "first tax bracket starts at {} UTM instead of 0",
                first.from_units
            )));
        }

        for (index, bracket) in self.tax_brackets.iter().enumerate() {
            let is_last = index == self.tax_brackets.len() - 1;
            match (bracket.to_units, is_last) {
                (None, true) => {}
                (None, false) => {
                    return Err(self.invalid(format!(
                        "open-ended tax bracket at {} UTM is not the last one",
                        bracket.from_units
                    )));
                }
                (Some(to), true) => {
                    return Err(self.invalid(format!(
                        "last tax bracket ends at {} UTM instead of being open-ended",
                        to
                    )));
                }
                (Some(to), false) => {
                    if to <= bracket.from_units {
                        return Err(self.invalid(format!(
                            "tax bracket starting at {} UTM does not ascend",
                            bracket.from_units
                        )));
                    }
                    let next = &self.tax_brackets[index + 1];
                    if next.from_units != to {
                        return Err(self.invalid(format!(
                            "tax brackets are not contiguous at {} UTM",
                            to
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> EngineError {
        EngineError::InvalidIndicators {
            year: self.year,
            month: self.month,
            message: message.into(),
        }
    }
}

/// Indicators narrowed down to the scalars that apply to one worker.
///
/// Produced by the resolver; consumed by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIndicators {
    /// The period year.
    pub year: i32,
    /// The period month.
    pub month: u32,
    /// Pesos per UF.
    pub unit_of_account_value: Decimal,
    /// Pesos per UTM.
    pub monthly_tax_unit_value: Decimal,
    /// Monthly minimum wage in pesos.
    pub minimum_wage: Decimal,
    /// The worker's pension fund name.
    pub pension_fund: String,
    /// The worker's pension contribution percent.
    pub pension_rate: Decimal,
    /// True when the fund had no published rate and the caller's default was used.
    pub pension_rate_used_fallback: bool,
    /// Unemployment-insurance rates for the worker's contract type.
    pub unemployment: UnemploymentRates,
    /// The year's income-tax table.
    pub tax_brackets: Vec<TaxBracket>,
}
