//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Access logger, records every request with status and latency
//! 2. Cache control, marks patient-data responses as `no-store`

pub mod audit;
pub mod cache;
