//! Price Value Object
//!
//! A non-negative amount in the smallest currency unit. Stored as an
//! integer so arithmetic and ordering never touch floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ListingsError, ListingsResult};

/// Validated listing price
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    /// Create a price, rejecting negative amounts
    pub fn new(amount: i64) -> ListingsResult<Self> {
        if amount < 0 {
            return Err(ListingsError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }
        Ok(Self(amount))
    }

    /// Rebuild from a stored value (guarded by a CHECK constraint)
    pub fn from_db(amount: i64) -> Self {
        Self(amount)
    }

    /// Amount in the smallest currency unit
    #[inline]
    pub fn amount(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = ListingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ListingsError::Validation("Price must be a whole number".to_string()))?;
        Self::new(amount)
    }
}

impl TryFrom<i64> for Price {
    type Error = ListingsError;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
