//! Spoiler-Gated Visibility
//!
//! Every comment records how far its author had read when it was posted. A
//! reader may see a comment only once their own recorded progress for the same
//! book in the same group has reached that point.
//!
//! # Rules
//!
//! - The reader's threshold is their recorded progress percentage, or 0.00%
//!   when nothing has been recorded yet.
//! - A comment is visible when `comment.progress <= threshold`. There is no
//!   margin in either direction.
//! - Visible comments are ordered by progress ascending, then by creation
//!   time ascending. Items equal on both keys keep their input order.
//! - The comments "ahead" of a reader are exactly the ones that are not
//!   visible, in the same order.
//!
//! # Example
//!
//! ```rust
//! use bookclub::shared::progress::Percentage;
//! use bookclub::shared::visibility::VisibilityThreshold;
//!
//! let reader = VisibilityThreshold::for_reader(Some(Percentage::from_hundredths(4250).unwrap()));
//! assert!(reader.allows(Percentage::from_hundredths(4250).unwrap()));
//! assert!(!reader.allows(Percentage::from_hundredths(4251).unwrap()));
//!
//! let newcomer = VisibilityThreshold::for_reader(None);
//! assert!(newcomer.allows(Percentage::ZERO));
//! ```

use chrono::{DateTime, Utc};

use crate::shared::error::SharedError;
use crate::shared::progress::Percentage;

/// Anything positioned in a book by a progress marker.
pub trait ProgressMarked {
    /// Progress recorded when the item was created
    fn progress(&self) -> Percentage;
    /// Creation timestamp, used as the ordering tiebreak
    fn created_at(&self) -> DateTime<Utc>;
}

/// How far into a book a reader is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct VisibilityThreshold(Percentage);

impl VisibilityThreshold {
    /// Threshold for a reader with the given recorded progress, if any.
    pub fn for_reader(recorded: Option<Percentage>) -> Self {
        Self(recorded.unwrap_or(Percentage::ZERO))
    }

    pub fn percentage(&self) -> Percentage {
        self.0
    }

    /// Whether an item at `progress` may be shown.
    pub fn allows(&self, progress: Percentage) -> bool {
        progress <= self.0
    }

    /// Check a single item, for direct lookups.
    ///
    /// # Errors
    ///
    /// `SharedError::InsufficientProgress` when the item lies beyond the threshold.
    pub fn check<T: ProgressMarked>(&self, item: &T) -> Result<(), SharedError> {
        if self.allows(item.progress()) {
            Ok(())
        } else {
            Err(SharedError::insufficient_progress(item.progress(), self.0))
        }
    }

    /// Items the reader may see, in display order.
    pub fn visible<T, I>(&self, items: I) -> Vec<T>
    where
        T: ProgressMarked,
        I: IntoIterator<Item = T>,
    {
        self.partition(items).0
    }

    /// Items beyond the reader's threshold, in display order.
    pub fn ahead<T, I>(&self, items: I) -> Vec<T>
    where
        T: ProgressMarked,
        I: IntoIterator<Item = T>,
    {
        self.partition(items).1
    }

    /// Split items into `(visible, ahead)`, both in display order.
    pub fn partition<T, I>(&self, items: I) -> (Vec<T>, Vec<T>)
    where
        T: ProgressMarked,
        I: IntoIterator<Item = T>,
    {
        let (mut visible, mut ahead): (Vec<T>, Vec<T>) = items
            .into_iter()
            .partition(|item| self.allows(item.progress()));
        sort_for_display(&mut visible);
        sort_for_display(&mut ahead);
        (visible, ahead)
    }
}

/// Stable sort by (progress, created_at).
pub fn sort_for_display<T: ProgressMarked>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.progress()
            .cmp(&b.progress())
            .then_with(|| a.created_at().cmp(&b.created_at()))
    });
}
