//! Core data models for the Payslip Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod indicators;
mod payslip;
mod period;
mod worker;

pub use indicators::{
    PeriodIndicators, ResolvedIndicators, TaxBracket, UnemploymentRateTable, UnemploymentRates,
};
pub use payslip::{AuditStep, AuditWarning, LineCategory, PayslipLineItem, PayslipResult};
pub use period::{
    FULL_MONTH_DAYS, MAX_DAYS_WORKED, MAX_OVERTIME_HOURS, PeriodVariableInputs, VoluntaryDeduction,
};
pub use worker::{
    ContractType, FixedAllowance, Gratification, HealthPlan, MAX_ADDITIONAL_UNITS, MAX_PESO_AMOUNT,
    WorkerCompensationFacts,
};
