//! Configuration loading for the Payslip Engine.
//!
//! Monthly indicators and yearly tax tables are read from YAML files into an
//! [`IndicatorStore`]; server settings come from the environment.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::IndicatorStore;
//!
//! let store = IndicatorStore::load("./config/indicators").unwrap();
//! for period in store.periods() {
//!     println!("{:02}/{}: UTM {}", period.month, period.year, period.monthly_tax_unit_value);
//! }
//! ```

mod loader;
mod settings;
mod types;

pub use loader::IndicatorStore;
pub use settings::ServerSettings;
pub use types::{PeriodFile, TaxTableFile};
