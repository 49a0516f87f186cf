//! Indicator store.
//!
//! This module provides the [`IndicatorStore`] type, which loads monthly
//! indicators and yearly tax tables from YAML files and serves them as an
//! [`IndicatorSource`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{PeriodIndicators, TaxBracket};
use crate::resolver::IndicatorSource;

use super::types::{PeriodFile, TaxTableFile};

/// Loaded, validated indicators keyed by period.
///
/// # Directory Structure
///
/// ```text
/// config/indicators/
/// ├── periods/
/// │   ├── 2025-01.yaml   # One file per month
/// │   └── 2025-02.yaml
/// └── tax_tables/
///     └── 2025.yaml      # One bracket table per year
/// ```
///
/// # Example
///
/// ```
/// use payslip_engine::config::IndicatorStore;
///
/// let store = IndicatorStore::load("./config/indicators")?;
/// let january = store.get(2025, 1).expect("January is configured");
/// assert_eq!(january.tax_brackets.len(), 8);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndicatorStore {
    periods: BTreeMap<(i32, u32), PeriodIndicators>,
}

impl IndicatorStore {
    /// Loads every period and tax table under `path`.
    ///
    /// Returns an error if:
    /// - Either subdirectory is missing or holds no YAML files
    /// - Any file contains invalid YAML
    /// - Two files describe the same period or the same tax year
    /// - A period has no tax table for its year
    /// - A period fails [`PeriodIndicators::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let mut tax_tables: BTreeMap<i32, Vec<TaxBracket>> = BTreeMap::new();
        for file in Self::yaml_files(&path.join("tax_tables"))? {
            let table = Self::load_yaml::<TaxTableFile>(&file)?;
            if tax_tables.insert(table.year, table.brackets).is_some() {
                return Err(EngineError::ConfigParseError {
                    path: file.display().to_string(),
                    message: format!("duplicate tax table for {}", table.year),
                });
            }
        }

        let mut periods = Vec::new();
        for file in Self::yaml_files(&path.join("periods"))? {
            let period = Self::load_yaml::<PeriodFile>(&file)?;
            let tax_brackets = tax_tables
                .get(&period.year)
                .cloned()
                .ok_or(EngineError::MissingTaxBrackets { year: period.year })?;

            periods.push(PeriodIndicators {
                year: period.year,
                month: period.month,
                unit_of_account_value: period.unit_of_account_value,
                monthly_tax_unit_value: period.monthly_tax_unit_value,
                minimum_wage: period.minimum_wage,
                pension_fund_rates: period.pension_fund_rates,
                unemployment_rates: period.unemployment_rates,
                tax_brackets,
            });
        }

        let store = Self::from_periods(periods)?;
        info!(
            path = %path.display(),
            periods = store.periods.len(),
            tax_years = tax_tables.len(),
            "Indicators loaded"
        );
        Ok(store)
    }

    /// Builds a store from already-assembled periods.
    ///
    /// Every period is validated; two entries for the same period are an error.
    pub fn from_periods(periods: Vec<PeriodIndicators>) -> EngineResult<Self> {
        let mut store = Self::default();
        for period in periods {
            period.validate()?;
            match store.periods.entry((period.year, period.month)) {
                Entry::Occupied(_) => {
                    return Err(EngineError::InvalidIndicators {
                        year: period.year,
                        month: period.month,
                        message: "period is configured more than once".to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(period);
                }
            }
        }
        Ok(store)
    }

    /// Returns the indicators for a period, if configured.
    pub fn get(&self, year: i32, month: u32) -> Option<&PeriodIndicators> {
        self.periods.get(&(year, month))
    }

    /// Returns every configured period in chronological order.
    pub fn periods(&self) -> impl Iterator<Item = &PeriodIndicators> {
        self.periods.values()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Lists the YAML files in a directory, sorted by name.
    fn yaml_files(dir: &Path) -> EngineResult<Vec<PathBuf>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no YAML files found)", dir_str),
            });
        }

        files.sort();
        Ok(files)
    }
}

impl IndicatorSource for IndicatorStore {
    fn period_indicators(&self, year: i32, month: u32) -> EngineResult<PeriodIndicators> {
        self.get(year, month)
            .cloned()
            .ok_or(EngineError::MissingIndicators { year, month })
    }
}
