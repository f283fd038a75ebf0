//! Beneficiary allocations and the proportional splitter.
//!
//! Weights are relative (they need not sum to 100). Every beneficiary but
//! the last receives `floor(total * weight / total_weight)`; the last one
//! absorbs whatever the floors left over, so the shares always add up to
//! exactly `total`.

pub mod error;
pub mod split;

pub use error::AllocationError;
pub use split::{split, total_weight, validate, AllocationByAmount, AllocationByPercentage};
