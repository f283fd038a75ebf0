//! Token amount type for pool-share (LP) balances.
//!
//! Balances are arbitrary-precision unsigned integers. Intermediate products
//! such as `balance * weight` never overflow, and no floating point is ever
//! involved.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::TypesError;

/// A non-negative token quantity in raw base units.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(BigUint);

impl TokenAmount {
    pub fn new(raw: BigUint) -> Self {
        Self(raw)
    }

    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::default()
    }

    /// Narrow to `u64`, the width of on-chain token amounts.
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(&self.0).ok()
    }
}

impl From<u64> for TokenAmount {
    fn from(raw: u64) -> Self {
        Self(BigUint::from(raw))
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(BigUint::from(raw))
    }
}

impl FromStr for TokenAmount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        trimmed
            .parse::<BigUint>()
            .map(Self)
            .map_err(|e| TypesError::InvalidAmount(format!("{s}: {e}")))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a TokenAmount> for TokenAmount {
    type Output = Self;
    fn add(self, rhs: &'a TokenAmount) -> Self {
        Self(self.0 + &rhs.0)
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a TokenAmount> for TokenAmount {
    fn sum<I: Iterator<Item = &'a TokenAmount>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_beyond_u128() {
        let big = "340282366920938463463374607431768211456"; // u128::MAX + 1
        let amount: TokenAmount = big.parse().unwrap();
        assert_eq!(amount.to_string(), big);
        assert_eq!(amount.to_u64(), None);
    }

    #[test]
    fn rejects_signs_and_garbage() {
        assert!("-5".parse::<TokenAmount>().is_err());
        assert!("12a".parse::<TokenAmount>().is_err());
        assert!("".parse::<TokenAmount>().is_err());
    }

    #[test]
    fn sum_of_references() {
        let parts = vec![TokenAmount::from(1u64), TokenAmount::from(2u64)];
        let total: TokenAmount = parts.iter().sum();
        assert_eq!(total, TokenAmount::from(3u64));
    }

    #[test]
    fn narrows_to_u64_when_it_fits() {
        assert_eq!(TokenAmount::from(u64::MAX).to_u64(), Some(u64::MAX));
    }
}
