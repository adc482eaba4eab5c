use std::fmt;

use chrono::{DateTime, Months, SecondsFormat, Utc};

/// Absolute instant, in milliseconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Earliest representable instant.
    pub const MIN: Self = Self(i64::MIN);
    /// Latest representable instant.
    pub const MAX: Self = Self(i64::MAX);
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Create an instant from epoch milliseconds.
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Epoch milliseconds.
    pub fn millis(self) -> i64 {
        self.0
    }

    /// Calendar view of this instant, when it is inside chrono's supported range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    /// Move this instant forward by `d`.
    ///
    /// Saturates at [`Timestamp::MIN`]/[`Timestamp::MAX`]; calendar durations that leave
    /// chrono's range saturate the same way.
    pub fn plus(self, d: Duration) -> Self {
        match d {
            Duration::Millis(ms) => Self(self.0.saturating_add(ms)),
            Duration::Months(0) => self,
            Duration::Months(m) => {
                let shifted = self.to_datetime().and_then(|dt| {
                    let months = Months::new(m.unsigned_abs());
                    if m > 0 {
                        dt.checked_add_months(months)
                    } else {
                        dt.checked_sub_months(months)
                    }
                });
                match shifted {
                    Some(dt) => Self(dt.timestamp_millis()),
                    None if m > 0 => Self::MAX,
                    None => Self::MIN,
                }
            }
        }
    }

    /// Move this instant backward by `d`.
    pub fn minus(self, d: Duration) -> Self {
        self.plus(d.negate())
    }

    /// Signed milliseconds from `earlier` to `self`, saturating.
    pub fn millis_since(self, earlier: Self) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Length of time, either fixed or calendar-relative.
///
/// Calendar durations have no fixed length: "1 month" from January 31st is not the same number
/// of milliseconds as from February 1st. Closed-form stepping arithmetic only accepts fixed
/// durations (see [`Duration::as_millis`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    /// Fixed number of milliseconds.
    Millis(i64),
    /// Whole calendar months.
    Months(i32),
}

impl Duration {
    /// Zero-length fixed duration.
    pub const ZERO: Self = Self::Millis(0);

    /// Fixed duration of `ms` milliseconds.
    pub fn millis(ms: i64) -> Self {
        Self::Millis(ms)
    }

    /// Fixed duration of `secs` seconds.
    pub fn seconds(secs: i64) -> Self {
        Self::Millis(secs.saturating_mul(1_000))
    }

    /// Calendar duration of `n` months.
    pub fn months(n: i32) -> Self {
        Self::Months(n)
    }

    /// Duration pointing the other way in time.
    pub fn negate(self) -> Self {
        match self {
            Self::Millis(ms) => Self::Millis(ms.saturating_neg()),
            Self::Months(m) => Self::Months(m.saturating_neg()),
        }
    }

    /// Duration multiplied by an integer step count, saturating.
    pub fn times(self, n: i64) -> Self {
        match self {
            Self::Millis(ms) => Self::Millis(ms.saturating_mul(n)),
            Self::Months(m) => {
                let total = i64::from(m).saturating_mul(n);
                Self::Months(total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            }
        }
    }

    /// Return `true` when this duration is exactly representable in milliseconds.
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Millis(_))
    }

    /// Exact milliseconds, or `None` for calendar-relative durations.
    pub fn as_millis(self) -> Option<i64> {
        match self {
            Self::Millis(ms) => Some(ms),
            Self::Months(_) => None,
        }
    }

    /// Return `true` when the duration moves time forward.
    pub fn is_positive(self) -> bool {
        match self {
            Self::Millis(ms) => ms > 0,
            Self::Months(m) => m > 0,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{ms}ms"),
            Self::Months(m) => write!(f, "{m}mo"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
