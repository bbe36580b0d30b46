//! Defines [`TimeSpan`], the half-open time interval used to bound requests
//! and to reconstruct timestamps from forecast time layouts.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// A half-open interval `[begin, end)` over UTC instants.
///
/// Construction normalizes reversed bounds, so `begin() <= end()` always
/// holds.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use noaa_weather::TimeSpan;
///
/// let begin = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2014, 12, 31, 0, 0, 0).unwrap();
/// let span = TimeSpan::new(end, begin); // reversed on purpose
/// assert_eq!(span.begin(), begin);
/// assert_eq!(span.end(), end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if begin <= end {
            Self { begin, end }
        } else {
            Self {
                begin: end,
                end: begin,
            }
        }
    }

    pub fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.begin
    }

    /// Splits this span into an ordered, contiguous, non-overlapping cover
    /// where every piece is at most `max` long.
    ///
    /// The first piece starts at `begin()`, the last piece ends exactly at
    /// `end()`, and a remaining duration of exactly `max` produces a single
    /// final piece. A zero-duration span yields one zero-length piece.
    pub fn split(&self, max: TimeDelta) -> Vec<TimeSpan> {
        debug_assert!(max > TimeDelta::zero(), "max span must be positive");
        if self.begin == self.end {
            return vec![*self];
        }

        let mut pieces = Vec::new();
        let mut begin = self.begin;

        while begin < self.end {
            let take = (self.end - begin).min(max);
            let end = begin + take;
            pieces.push(TimeSpan { begin, end });
            begin = end;
        }

        pieces
    }

    /// Enumerates hour boundaries covered by this span.
    ///
    /// Both bounds are rounded to the nearest hour; the result holds one
    /// instant per hour from the rounded begin through the rounded end
    /// inclusive, collapsing to a single instant when the rounded bounds
    /// coincide.
    pub fn hours(&self) -> Vec<DateTime<Utc>> {
        let hour = TimeDelta::hours(1);
        let begin = self.begin.duration_round(hour).unwrap_or(self.begin);
        let end = self.end.duration_round(hour).unwrap_or(self.end);

        if begin >= end {
            return vec![begin];
        }

        let num_hours = (end - begin).num_hours();
        (0..=num_hours)
            .map(|i| begin + TimeDelta::hours(i))
            .collect()
    }
}
