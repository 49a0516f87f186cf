//! Batch payroll runs.
//!
//! A run fetches the period's indicators once, then computes every worker's
//! payslip in parallel against that single snapshot.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{compute_payslip, employer_unemployment_contribution};
use crate::error::EngineResult;
use crate::models::{PayslipResult, PeriodIndicators, PeriodVariableInputs, WorkerCompensationFacts};
use crate::resolver::IndicatorSource;

/// One worker's inputs in a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// The worker's contract terms.
    pub worker: WorkerCompensationFacts,
    /// The worker's entries for the period.
    pub variable: PeriodVariableInputs,
}

/// One worker's computed payslip in a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPayslip {
    /// The worker identifier.
    pub worker_id: String,
    /// The computed payslip.
    pub payslip: PayslipResult,
    /// The employer's unemployment-insurance contribution for this worker.
    pub employer_unemployment: Decimal,
}

/// Sums across every payslip in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunTotals {
    /// Number of payslips computed.
    pub worker_count: usize,
    /// Sum of taxable bases.
    pub taxable_base: Decimal,
    /// Sum of total earnings.
    pub total_earnings: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub net_pay: Decimal,
    /// Sum of employer unemployment-insurance contributions.
    pub employer_unemployment: Decimal,
}

/// The result of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The period year.
    pub year: i32,
    /// The period month.
    pub month: u32,
    /// Payslips in the order the entries were given.
    pub payslips: Vec<WorkerPayslip>,
    /// Run totals.
    pub totals: PayrollRunTotals,
}

/// Computes payslips for every entry against one period.
///
/// Fails with [`crate::error::EngineError::MissingIndicators`] before any
/// payslip is computed when the period is not configured. Each worker's own
/// contribution rate is the fallback for funds without a published rate.
/// Entries must already be validated.
pub fn run_payroll<S: IndicatorSource + ?Sized>(
    source: &S,
    year: i32,
    month: u32,
    entries: &[PayrollEntry],
) -> EngineResult<PayrollRun> {
    let snapshot = source.period_indicators(year, month)?;

    let payslips: Vec<WorkerPayslip> = entries
        .par_iter()
        .map(|entry| compute_entry(&snapshot, entry))
        .collect::<EngineResult<Vec<_>>>()?;

    let totals = payslips.iter().fold(
        PayrollRunTotals::default(),
        |mut totals, worker_payslip| {
            let payslip = &worker_payslip.payslip;
            totals.worker_count += 1;
            totals.taxable_base += payslip.taxable_base;
            totals.total_earnings += payslip.total_earnings;
            totals.total_deductions += payslip.total_deductions;
            totals.net_pay += payslip.net_pay;
            totals.employer_unemployment += worker_payslip.employer_unemployment;
            totals
        },
    );

    info!(
        year,
        month,
        workers = totals.worker_count,
        total_earnings = %totals.total_earnings,
        net_pay = %totals.net_pay,
        "Payroll run completed"
    );

    Ok(PayrollRun {
        year,
        month,
        payslips,
        totals,
    })
}

fn compute_entry(snapshot: &PeriodIndicators, entry: &PayrollEntry) -> EngineResult<WorkerPayslip> {
    let indicators = snapshot.resolve_for_worker(
        &entry.worker.pension_fund,
        entry.worker.contract_type,
        Some(entry.worker.pension_fund_contribution_rate),
    )?;
    let payslip = compute_payslip(&entry.worker, &entry.variable, &indicators);
    let employer_unemployment =
        employer_unemployment_contribution(payslip.taxable_base, indicators.unemployment);

    Ok(WorkerPayslip {
        worker_id: entry.worker.worker_id.clone(),
        payslip,
        employer_unemployment,
    })
}
