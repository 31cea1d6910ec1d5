use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A quantity of coins carried by a transaction output.
///
/// Amounts are signed so that a malformed transaction can declare a negative output; such
/// transactions are rejected during validation rather than at construction.
#[derive(
    Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub struct Amount(i64);

impl Amount {
    pub const fn new(amount: i64) -> Self {
        Amount(amount)
    }

    pub const fn zero() -> Self {
        Self::new(0)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums the amounts, returning None if any partial sum overflows.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |sum, amount| sum.checked_add(amount))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self(value as i64)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
