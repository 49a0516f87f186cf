//! Configuration file formats.
//!
//! These structures mirror the YAML files under `config/indicators/` and are
//! joined into [`PeriodIndicators`](crate::models::PeriodIndicators) by the
//! store.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{TaxBracket, UnemploymentRateTable};

/// One month's published indicators (`periods/YYYY-MM.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodFile {
    /// The period year.
    pub year: i32,
    /// The period month (1-12).
    pub month: u32,
    /// Pesos per UF.
    pub unit_of_account_value: Decimal,
    /// Pesos per UTM.
    pub monthly_tax_unit_value: Decimal,
    /// Monthly minimum wage.
    pub minimum_wage: Decimal,
    /// Worker contribution percent by pension fund name.
    pub pension_fund_rates: BTreeMap<String, Decimal>,
    /// Unemployment-insurance rates by contract type.
    pub unemployment_rates: UnemploymentRateTable,
}

/// One year's income-tax bracket table (`tax_tables/YYYY.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxTableFile {
    /// The year the table applies to.
    pub year: i32,
    /// Brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}
