use std::{cmp::Ordering, fmt};

use crate::foundation::{
    error::{PlanError, PlanResult},
    time::{Duration, Timestamp},
};

/// Half-open time interval `[start, end)`, either end optionally unbounded.
///
/// A bounded span with `start == end` is an instant: it contains nothing, but it overlaps any
/// span that contains its instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawSpan", into = "RawSpan")]
pub struct TimeSpan {
    start: Option<Timestamp>, // None: unbounded in the past
    end: Option<Timestamp>,   // None: unbounded in the future
}

#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawSpan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Timestamp>,
}

impl TryFrom<RawSpan> for TimeSpan {
    type Error = PlanError;

    fn try_from(raw: RawSpan) -> PlanResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl From<TimeSpan> for RawSpan {
    fn from(span: TimeSpan) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

/// Orders end bounds, treating `None` as the unbounded future.
fn cmp_end(a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

fn start_before_end(start: Option<Timestamp>, end: Option<Timestamp>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s < e,
        _ => true,
    }
}

impl TimeSpan {
    /// Create a validated span with `start <= end`. `None` leaves that end unbounded.
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> PlanResult<Self> {
        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(PlanError::invalid_argument(format!(
                "time span start {s} is after its end {e}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a validated bounded span.
    pub fn bounded(start: Timestamp, end: Timestamp) -> PlanResult<Self> {
        Self::new(Some(start), Some(end))
    }

    /// Span `[start, +inf)`.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Span `(-inf, end)`.
    pub fn ending_at(end: Timestamp) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Fully unbounded span.
    pub fn timeless() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Canonical empty span at the epoch.
    pub fn zero() -> Self {
        Self::instant(Timestamp::EPOCH)
    }

    /// Zero-length span at `t`.
    pub fn instant(t: Timestamp) -> Self {
        Self {
            start: Some(t),
            end: Some(t),
        }
    }

    /// Span `[start, start + d)`. A negative `d` yields the instant at `start`.
    pub fn from_start(start: Timestamp, d: Duration) -> Self {
        let end = start.plus(d).max(start);
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Span `[end - d, end)`. A negative `d` yields the instant at `end`.
    pub fn from_end(end: Timestamp, d: Duration) -> Self {
        let start = end.minus(d).min(end);
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Inclusive start, `None` when unbounded.
    pub fn start(self) -> Option<Timestamp> {
        self.start
    }

    /// Exclusive end, `None` when unbounded.
    pub fn end(self) -> Option<Timestamp> {
        self.end
    }

    /// Return `true` when both ends are bounded.
    pub fn is_bounded(self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Return `true` when neither end is bounded.
    pub fn is_timeless(self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Return `true` for bounded spans of zero length.
    pub fn is_zero(self) -> bool {
        self.is_bounded() && self.start == self.end
    }

    /// Length in milliseconds for bounded spans.
    pub fn duration_millis(self) -> Option<i64> {
        Some(self.end?.millis_since(self.start?))
    }

    /// Center of a bounded span (rounded toward `start`).
    pub fn midpoint(self) -> Option<Timestamp> {
        let (s, e) = (self.start?, self.end?);
        let mid = (i128::from(s.0) + i128::from(e.0)).div_euclid(2);
        Some(Timestamp(mid as i64))
    }

    /// Return `true` when `t` is inside `[start, end)`.
    pub fn contains_instant(self, t: Timestamp) -> bool {
        self.start.is_none_or(|s| s <= t) && self.end.is_none_or(|e| t < e)
    }

    /// Return `true` when `other` lies entirely within this span.
    pub fn contains_span(self, other: TimeSpan) -> bool {
        self.start <= other.start && cmp_end(other.end, self.end) != Ordering::Greater
    }

    /// Return `true` when the spans share at least one instant.
    pub fn overlaps(self, other: TimeSpan) -> bool {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => self == other,
            (true, false) => self.start.is_some_and(|t| other.contains_instant(t)),
            (false, true) => other.start.is_some_and(|t| self.contains_instant(t)),
            (false, false) => {
                start_before_end(self.start, other.end) && start_before_end(other.start, self.end)
            }
        }
    }

    /// Return `true` when this span overlaps any of `others`.
    pub fn overlaps_any(self, others: &[TimeSpan]) -> bool {
        others.iter().any(|o| self.overlaps(*o))
    }

    /// Common part of two spans, `None` when they do not overlap.
    pub fn intersection(self, other: TimeSpan) -> Option<TimeSpan> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start.max(other.start);
        let end = match cmp_end(self.end, other.end) {
            Ordering::Greater => other.end,
            _ => self.end,
        };
        Some(Self { start, end })
    }

    /// Smallest span covering both spans.
    pub fn hull(self, other: TimeSpan) -> TimeSpan {
        let end = match cmp_end(self.end, other.end) {
            Ordering::Less => other.end,
            _ => self.end,
        };
        Self {
            start: self.start.min(other.start),
            end,
        }
    }

    /// Remove every span in `skips` from this one.
    ///
    /// The remaining pieces are returned in chronological order; empty pieces are dropped.
    pub fn subtract(self, skips: &[TimeSpan]) -> Vec<TimeSpan> {
        let mut pieces = vec![self];
        for skip in skips {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| piece.subtract_one(*skip))
                .collect();
        }
        pieces
    }

    fn subtract_one(self, skip: TimeSpan) -> Vec<TimeSpan> {
        if skip.is_zero() || !self.overlaps(skip) {
            return vec![self];
        }
        let mut out = Vec::with_capacity(2);
        if self.start < skip.start {
            out.push(Self {
                start: self.start,
                end: skip.start,
            });
        }
        if cmp_end(skip.end, self.end) == Ordering::Less {
            out.push(Self {
                start: skip.end,
                end: self.end,
            });
        }
        out.retain(|p| !p.is_zero());
        out
    }

    /// Shift both bounded ends by `d`.
    pub fn plus(self, d: Duration) -> Self {
        Self {
            start: self.start.map(|s| s.plus(d)),
            end: self.end.map(|e| e.plus(d)),
        }
    }

    /// Shift both bounded ends by `-d`.
    pub fn minus(self, d: Duration) -> Self {
        self.plus(d.negate())
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(s) => write!(f, "[{s}, ")?,
            None => f.write_str("(-inf, ")?,
        }
        match self.end {
            Some(e) => write!(f, "{e})"),
            None => f.write_str("+inf)"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/span.rs"]
mod tests;
