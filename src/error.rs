//! Error types for the Payslip Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading indicators,
//! resolving them for a worker, or validating calculation inputs.

use thiserror::Error;

/// The main error type for the Payslip Engine.
///
/// Indicator errors (`MissingIndicators`, `MissingTaxBrackets`) describe
/// configuration data that has not been entered yet and must reach the
/// end user unmodified. Input errors describe a caller bug.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::MissingIndicators { year: 2025, month: 3 };
/// assert_eq!(
///     error.to_string(),
///     "No indicators configured for 03/2025; configure them first"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No indicator record exists for the requested period.
    #[error("No indicators configured for {month:02}/{year}; configure them first")]
    MissingIndicators {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

    /// No income-tax bracket table exists for the requested year.
    #[error("No income tax brackets configured for {year}")]
    MissingTaxBrackets {
        /// The year without a bracket table.
        year: i32,
    },

    /// The worker's pension fund has no published rate and no fallback was supplied.
    #[error("Unknown pension fund: {fund}")]
    UnknownFund {
        /// The fund name as given by the caller.
        fund: String,
    },

    /// A period's indicators are present but inconsistent.
    #[error("Invalid indicators for {month:02}/{year}: {message}")]
    InvalidIndicators {
        /// The period year.
        year: i32,
        /// The period month.
        month: u32,
        /// A description of what is wrong.
        message: String,
    },

    /// A calculation input violated its contract.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
