use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("bucket pattern"));

/// Calendar-month key (`YYYY-MM`) used to bucket per-month usage counters.
///
/// Immutable once validated: the only ways in are [`YearMonthBucket::new`]
/// and [`YearMonthBucket::current`], so a held value is always well-formed.
/// Serializes as its plain string form, including as a JSON map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonthBucket(String);

impl YearMonthBucket {
    pub fn new(candidate: &str) -> Result<Self, ValidationError> {
        if !PATTERN.is_match(candidate) {
            return Err(ValidationError::constraint(
                ".",
                r"must match ^\d{4}-\d{2}$",
                candidate,
            ));
        }
        // The pattern admits months like "13"; reject them here.
        let month: u32 = candidate[5..7].parse().unwrap_or(0);
        if !(1..=12).contains(&month) {
            return Err(ValidationError::constraint(
                ".",
                "month must be between 01 and 12",
                candidate,
            ));
        }
        Ok(YearMonthBucket(candidate.to_string()))
    }

    /// The bucket for the current UTC month.
    pub fn current() -> Self {
        YearMonthBucket(Utc::now().format("%Y-%m").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YearMonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for YearMonthBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        YearMonthBucket::new(s)
    }
}

impl TryFrom<String> for YearMonthBucket {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        YearMonthBucket::new(&s)
    }
}

impl From<YearMonthBucket> for String {
    fn from(bucket: YearMonthBucket) -> String {
        bucket.0
    }
}
