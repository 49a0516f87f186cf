//! Payslip Engine for Chilean payroll
//!
//! This crate computes itemized monthly payslips ("liquidaciones de sueldo")
//! from a worker's contract terms and the government's monthly economic
//! indicators: proportional base pay, overtime, gratification, pension,
//! health and unemployment-insurance deductions, and progressive income tax.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
