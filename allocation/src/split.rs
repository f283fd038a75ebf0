//! Proportional split with remainder-to-last settlement.

use lplock_types::{Pubkey, TokenAmount};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// A beneficiary and its relative weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationByPercentage {
    #[serde(with = "lplock_types::serde_str")]
    pub address: Pubkey,
    pub percentage: u64,
}

impl AllocationByPercentage {
    pub fn new(address: Pubkey, percentage: u64) -> Self {
        Self { address, percentage }
    }
}

/// A beneficiary and the exact token amount it receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationByAmount {
    #[serde(with = "lplock_types::serde_str")]
    pub address: Pubkey,
    pub amount: TokenAmount,
}

/// Sum of all weights, computed without overflow.
pub fn total_weight(allocations: &[AllocationByPercentage]) -> BigUint {
    allocations
        .iter()
        .map(|a| BigUint::from(a.percentage))
        .sum()
}

/// Check the preconditions of [`split`] without needing a total.
pub fn validate(allocations: &[AllocationByPercentage]) -> Result<(), AllocationError> {
    if allocations.is_empty() {
        return Err(AllocationError::Empty);
    }
    if total_weight(allocations) == BigUint::default() {
        return Err(AllocationError::ZeroWeight);
    }
    Ok(())
}

/// Split `total` across `allocations` in input order.
///
/// Output has the same length and order as the input. The last entry gets
/// `total - sum(others)`, so a single allocation receives all of `total`.
pub fn split(
    total: &TokenAmount,
    allocations: &[AllocationByPercentage],
) -> Result<Vec<AllocationByAmount>, AllocationError> {
    validate(allocations)?;
    let weight_sum = total_weight(allocations);

    let (last, rest) = allocations
        .split_last()
        .ok_or(AllocationError::Empty)?;

    let mut amounts = Vec::with_capacity(allocations.len());
    let mut assigned = BigUint::default();
    for allocation in rest {
        let share = total.raw() * BigUint::from(allocation.percentage) / &weight_sum;
        assigned += &share;
        amounts.push(AllocationByAmount {
            address: allocation.address,
            amount: TokenAmount::new(share),
        });
    }

    // Floors never overshoot: sum(floor(t*p_i/S)) <= t*sum(p_i)/S <= t.
    amounts.push(AllocationByAmount {
        address: last.address,
        amount: TokenAmount::new(total.raw() - assigned),
    });
    Ok(amounts)
}
