//! Indicator resolution.
//!
//! Turns the stored indicators for a period into the [`ResolvedIndicators`]
//! one worker's payslip needs. The lookup is split in two: an
//! [`IndicatorSource`] fetches the period snapshot, and
//! [`PeriodIndicators::resolve_for_worker`] narrows it down without I/O, so a
//! payroll run fetches once and resolves every worker from the same snapshot.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContractType, PeriodIndicators, ResolvedIndicators};

/// A store of monthly indicators.
pub trait IndicatorSource {
    /// Returns the indicators for `year`/`month`.
    ///
    /// Fails with [`EngineError::MissingIndicators`] when the period has not
    /// been configured.
    fn period_indicators(&self, year: i32, month: u32) -> EngineResult<PeriodIndicators>;
}

impl PeriodIndicators {
    /// Narrows the period's indicators to one worker.
    ///
    /// The pension rate comes from the period's published table. When the
    /// fund is not listed, `fallback_rate` is used and the result is flagged;
    /// without a fallback the lookup fails with [`EngineError::UnknownFund`].
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::config::IndicatorStore;
    /// use payslip_engine::models::ContractType;
    /// use payslip_engine::resolver::IndicatorSource;
    ///
    /// let store = IndicatorStore::load("./config/indicators")?;
    /// let period = store.period_indicators(2025, 1)?;
    /// let resolved = period.resolve_for_worker("Capital", ContractType::Indefinite, None)?;
    /// assert!(!resolved.pension_rate_used_fallback);
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn resolve_for_worker(
        &self,
        pension_fund: &str,
        contract_type: ContractType,
        fallback_rate: Option<Decimal>,
    ) -> EngineResult<ResolvedIndicators> {
        let (pension_rate, pension_rate_used_fallback) =
            match (self.pension_rate(pension_fund), fallback_rate) {
                (Some(rate), _) => (rate, false),
                (None, Some(fallback)) => {
                    warn!(
                        year = self.year,
                        month = self.month,
                        pension_fund = %pension_fund,
                        fallback_rate = %fallback,
                        "Pension fund has no published rate; using fallback"
                    );
                    (fallback, true)
                }
                (None, None) => {
                    return Err(EngineError::UnknownFund {
                        fund: pension_fund.to_string(),
                    });
                }
            };

        let unemployment = self.unemployment_rates.for_contract(contract_type);

        debug!(
            year = self.year,
            month = self.month,
            pension_fund = %pension_fund,
            pension_rate = %pension_rate,
            contract_type = contract_type.as_str(),
            "Indicators resolved"
        );

        Ok(ResolvedIndicators {
            year: self.year,
            month: self.month,
            unit_of_account_value: self.unit_of_account_value,
            monthly_tax_unit_value: self.monthly_tax_unit_value,
            minimum_wage: self.minimum_wage,
            pension_fund: pension_fund.trim().to_string(),
            pension_rate,
            pension_rate_used_fallback,
            unemployment,
            tax_brackets: self.tax_brackets.clone(),
        })
    }
}

/// Fetches the period from `source` and resolves it for one worker.
pub fn resolve_indicators<S: IndicatorSource + ?Sized>(
    source: &S,
    year: i32,
    month: u32,
    pension_fund: &str,
    contract_type: ContractType,
    fallback_rate: Option<Decimal>,
) -> EngineResult<ResolvedIndicators> {
    source
        .period_indicators(year, month)?
        .resolve_for_worker(pension_fund, contract_type, fallback_rate)
}
