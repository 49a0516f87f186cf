//! HTTP API module for the Payslip Engine.
//!
//! This module provides the REST endpoints for computing single payslips,
//! running a period's payroll, and reading the stored indicators.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollRunRequest, PayslipRequest};
pub use response::{ApiError, PayrollRunResponse, PayslipResponse};
pub use state::AppState;
