//! Reading Progress Arithmetic
//!
//! A reader's position in a book is reported as a page and a page count. The
//! ratio between the two is kept as a fixed-point percentage with two
//! fractional digits, stored as an integer count of hundredths of a percent.
//! Integer storage means the value written when a comment is posted and the
//! value compared against when a reader lists comments are always the same
//! number; there is no float drift between the two sides of the comparison.
//!
//! # Rounding
//!
//! `page / total * 100` is rounded half-up to the nearest hundredth:
//!
//! ```rust
//! use bookclub::shared::progress::{Percentage, ReadingPosition};
//!
//! let position = ReadingPosition::new(1, 3).unwrap();
//! assert_eq!(Percentage::of(position).to_string(), "33.33");
//!
//! let position = ReadingPosition::new(2, 3).unwrap();
//! assert_eq!(Percentage::of(position).to_string(), "66.67");
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::shared::error::SharedError;

const SCALE: u32 = 10_000;

/// Progress through a book, in hundredths of a percent (`0..=10000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percentage(u16);

impl Percentage {
    /// 0.00%
    pub const ZERO: Percentage = Percentage(0);
    /// 100.00%
    pub const COMPLETE: Percentage = Percentage(SCALE as u16);

    /// Build a percentage from a raw hundredths value.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `hundredths` exceeds 10000.
    pub fn from_hundredths(hundredths: u32) -> Result<Self, SharedError> {
        if hundredths > SCALE {
            return Err(SharedError::validation(
                "progress_percentage",
                format!("{} hundredths is above 100%", hundredths),
            ));
        }
        Ok(Self(hundredths as u16))
    }

    /// Percentage read at `position`, rounded half-up to two decimals.
    pub fn of(position: ReadingPosition) -> Self {
        let page = u64::from(position.page);
        let total = u64::from(position.total);
        // round(page * 10000 / total) with ties going up
        let hundredths = (page * u64::from(SCALE) * 2 + total) / (total * 2);
        Self(hundredths as u16)
    }

    /// Raw hundredths value, as stored.
    pub fn hundredths(self) -> u32 {
        u32::from(self.0)
    }

    /// Value as a float, for JSON output.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl TryFrom<i64> for Percentage {
    type Error = SharedError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let hundredths = u32::try_from(value).map_err(|_| {
            SharedError::validation("progress_percentage", format!("{} is negative", value))
        })?;
        Self::from_hundredths(hundredths)
    }
}

impl From<Percentage> for i64 {
    fn from(value: Percentage) -> Self {
        i64::from(value.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// A validated (page, total) pair.
///
/// Construction enforces `total > 0` and `0 <= page <= total`, so a
/// `Percentage` is never computed from an impossible position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingPosition {
    page: u32,
    total: u32,
}

impl ReadingPosition {
    /// Validate a reported position.
    ///
    /// # Arguments
    ///
    /// * `page` - Current page (may be 0 for "not started")
    /// * `total` - Total pages in the edition being read
    ///
    /// # Errors
    ///
    /// Returns `SharedError::ValidationError` naming the offending field.
    pub fn new(page: i64, total: i64) -> Result<Self, SharedError> {
        if total <= 0 {
            return Err(SharedError::validation(
                "total_pages",
                "Total pages must be greater than zero",
            ));
        }
        if page < 0 {
            return Err(SharedError::validation(
                "current_page",
                "Current page cannot be negative",
            ));
        }
        if page > total {
            return Err(SharedError::validation(
                "current_page",
                "Current page cannot exceed total pages",
            ));
        }
        let total = u32::try_from(total)
            .map_err(|_| SharedError::validation("total_pages", "Total pages is too large"))?;
        // page <= total, so it fits too
        Ok(Self {
            page: page as u32,
            total,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn percentage(&self) -> Percentage {
        Percentage::of(*self)
    }
}
