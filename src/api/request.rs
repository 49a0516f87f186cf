//! Request types for the Payslip Engine API.
//!
//! This module defines the JSON request structures for the `/payslip` and
//! `/payroll-run` endpoints.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calculation::PayrollEntry;
use crate::error::{EngineError, EngineResult};
use crate::models::{PeriodVariableInputs, WorkerCompensationFacts};

/// Request body for the `/payslip` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The period year.
    pub year: i32,
    /// The period month (1-12).
    pub month: u32,
    /// The worker's contract terms.
    pub worker: WorkerCompensationFacts,
    /// The worker's entries for the period.
    pub variable: PeriodVariableInputs,
}

impl PayslipRequest {
    /// Validates the period and both input structures.
    pub fn validate(&self) -> EngineResult<()> {
        validate_month(self.month)?;
        self.worker.validate()?;
        self.variable.validate()
    }
}

/// Request body for the `/payroll-run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The period year.
    pub year: i32,
    /// The period month (1-12).
    pub month: u32,
    /// One entry per worker.
    pub entries: Vec<PayrollEntry>,
}

impl PayrollRunRequest {
    /// Validates the period and every entry; worker ids must be unique.
    pub fn validate(&self) -> EngineResult<()> {
        validate_month(self.month)?;

        let mut seen = HashSet::new();
        for entry in &self.entries {
            entry.worker.validate()?;
            entry.variable.validate()?;
            if !seen.insert(entry.worker.worker_id.as_str()) {
                return Err(EngineError::InvalidInput {
                    field: "entries".to_string(),
                    message: format!("worker '{}' appears more than once", entry.worker.worker_id),
                });
            }
        }
        Ok(())
    }
}

fn validate_month(month: u32) -> EngineResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(EngineError::InvalidInput {
            field: "month".to_string(),
            message: format!("must be between 1 and 12, got {}", month),
        })
    }
}
