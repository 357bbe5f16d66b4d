//! Date-prefixed task identifiers.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `YYMMDD` prefix shared by every task identifier minted on one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayPrefix(String);

impl DayPrefix {
    /// Number of characters in a prefix.
    pub const LEN: usize = 6;

    /// Formats the prefix for `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%y%m%d").to_string())
    }

    /// Returns the prefix as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-day sequence number in `1..=999`, rendered zero-padded to three
/// digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DailySequence(u16);

impl DailySequence {
    /// First sequence number of a day.
    pub const FIRST: Self = Self(1);

    /// Largest sequence number representable in three digits.
    pub const MAX: u16 = 999;

    /// Number of digits in the rendered sequence.
    pub const WIDTH: usize = 3;

    /// Creates a validated sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SequenceOutOfRange`] when `value` is zero or
    /// greater than [`Self::MAX`].
    pub const fn new(value: u16) -> Result<Self, TaskDomainError> {
        if value == 0 || value > Self::MAX {
            return Err(TaskDomainError::SequenceOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns the following sequence number, or `None` once the day's
    /// capacity is used up.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        if self.0 >= Self::MAX {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }
}

impl fmt::Display for DailySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Identifier of a task record.
///
/// Identifiers minted by the allocator have the form `YYMMDDnnn`. Values read
/// back from a request path are wrapped as-is, so any string can be used to
/// look a task up.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds the identifier for `sequence` on the day named by `prefix`.
    #[must_use]
    pub fn compose(prefix: &DayPrefix, sequence: DailySequence) -> Self {
        Self(format!("{prefix}{sequence}"))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the identifier was minted on the day of `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &DayPrefix) -> bool {
        self.0.starts_with(prefix.as_str())
    }

    /// Parses the trailing three-digit sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedTaskId`] unless the identifier is
    /// six prefix characters followed by exactly three ASCII digits, and
    /// [`TaskDomainError::SequenceOutOfRange`] for a `000` suffix.
    pub fn daily_sequence(&self) -> Result<DailySequence, TaskDomainError> {
        let suffix = self
            .0
            .get(DayPrefix::LEN..)
            .filter(|digits| {
                digits.len() == DailySequence::WIDTH && digits.bytes().all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| TaskDomainError::MalformedTaskId(self.0.clone()))?;
        let value = suffix
            .parse::<u16>()
            .map_err(|_| TaskDomainError::MalformedTaskId(self.0.clone()))?;
        DailySequence::new(value)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
