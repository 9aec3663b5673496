//! Calculation logic for derived salary fields.
//!
//! This module contains the base amount calculation for salary structure
//! assignments: dividing gross pay by the configured divider and clamping the
//! result to the minimum and maximum limits.

mod base_amount;

pub use base_amount::{
    BaseCalculationResult, apply_base_calculation, apply_limits, calculate_base, resolve_limit,
};
