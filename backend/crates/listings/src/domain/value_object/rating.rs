//! Rating Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ListingsError, ListingsResult};

/// Lowest accepted rating
pub const RATING_MIN: i16 = 1;

/// Highest accepted rating
pub const RATING_MAX: i16 = 5;

/// Review rating on a 1 to 5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Rating(i16);

impl Rating {
    /// Create a rating, rejecting values outside 1..=5
    pub fn new(value: i16) -> ListingsResult<Self> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(ListingsError::Validation(format!(
                "Rating must be between {RATING_MIN} and {RATING_MAX}"
            )));
        }
        Ok(Self(value))
    }

    /// Rebuild from a stored value (guarded by a CHECK constraint)
    pub fn from_db(value: i16) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> i16 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rating {
    type Err = ListingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i16>().map_err(|_| {
            ListingsError::Validation(format!(
                "Rating must be a number from {RATING_MIN} to {RATING_MAX}"
            ))
        })?;
        Self::new(value)
    }
}

impl TryFrom<i16> for Rating {
    type Error = ListingsError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
