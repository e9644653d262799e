//! core::types
//!
//! Strong types for frame options.
//!
//! # Types
//!
//! - [`CacheType`] - Frame cache strategy
//! - [`TimeQuantum`] - Validated time granularity (`Y`, `YM`, `YMDH`, ...)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a decoded descriptor either carries valid
//! options or fails to load.
//!
//! # Examples
//!
//! ```
//! use framedef::core::types::{CacheType, TimeQuantum};
//!
//! let cache: CacheType = "lru".parse().unwrap();
//! assert_eq!(cache, CacheType::Lru);
//!
//! let tq = TimeQuantum::new("YMD").unwrap();
//! assert!(tq.has_day());
//!
//! assert!(TimeQuantum::new("DY").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid cache type '{0}', expected one of: ranked, lru, none")]
    InvalidCacheType(String),

    #[error("invalid time quantum '{0}'")]
    InvalidTimeQuantum(String),
}

/// Cache strategy for a frame's rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CacheType {
    /// Keep rows ranked by count.
    #[default]
    Ranked,
    /// Least-recently-used eviction.
    Lru,
    /// No row cache.
    None,
}

impl CacheType {
    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheType::Ranked => "ranked",
            CacheType::Lru => "lru",
            CacheType::None => "none",
        }
    }
}

impl FromStr for CacheType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ranked" => Ok(CacheType::Ranked),
            "lru" => Ok(CacheType::Lru),
            "none" => Ok(CacheType::None),
            other => Err(TypeError::InvalidCacheType(other.to_string())),
        }
    }
}

impl TryFrom<String> for CacheType {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CacheType> for String {
    fn from(value: CacheType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time granularity of a frame.
///
/// A time quantum is empty or a contiguous run of the units `Y`, `M`, `D`,
/// `H` in that order. `YMD` is valid; `YD` (gap) and `DY` (order) are not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeQuantum(String);

impl TimeQuantum {
    const UNITS: &'static str = "YMDH";

    /// Create a validated time quantum.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTimeQuantum` if `value` is not a contiguous
    /// ordered run of `YMDH`.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        if value.is_empty() || Self::UNITS.contains(value.as_str()) {
            Ok(Self(value))
        } else {
            Err(TypeError::InvalidTimeQuantum(value))
        }
    }

    /// The empty quantum (no time views).
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_year(&self) -> bool {
        self.0.contains('Y')
    }

    pub fn has_month(&self) -> bool {
        self.0.contains('M')
    }

    pub fn has_day(&self) -> bool {
        self.0.contains('D')
    }

    pub fn has_hour(&self) -> bool {
        self.0.contains('H')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TimeQuantum {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeQuantum> for String {
    fn from(value: TimeQuantum) -> Self {
        value.0
    }
}

impl fmt::Display for TimeQuantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
