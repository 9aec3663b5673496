//! Advanced attendance hooks for HR/payroll documents
//!
//! This crate lets an attendance document accept more than one record per
//! employee per day when the record is flagged as an overlap or an additional
//! attendance, and derives the base amount of a salary structure assignment
//! from its gross pay using configurable divider and limits.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod models;
pub mod policy;
