use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};

use super::TickStep;

const DAY_MILLIS: i64 = 86_400_000;
const YEAR_MILLIS: i64 = 365 * DAY_MILLIS;

/// Calendar intervals usable as tick spacing on a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    /// Every `n` days, aligned to the day of the month.
    Days(u32),
    /// Sundays.
    Week,
    /// Every `n` months, aligned to January.
    Months(u32),
    /// Every `n` years, aligned to multiples of `n`.
    Years(i32),
}

// Candidates ordered by approximate duration, in millis
const CANDIDATES: [(TimeInterval, i64); 6] = [
    (TimeInterval::Days(1), DAY_MILLIS),
    (TimeInterval::Days(2), 2 * DAY_MILLIS),
    (TimeInterval::Week, 7 * DAY_MILLIS),
    (TimeInterval::Months(1), 30 * DAY_MILLIS),
    (TimeInterval::Months(3), 90 * DAY_MILLIS),
    (TimeInterval::Years(1), YEAR_MILLIS),
];

impl TimeInterval {
    /// Picks the interval that splits `start..stop` in a number of pieces
    /// closest to `count`.  Spans shorter than a day are ticked daily.
    pub fn for_span(start: DateTime<Utc>, stop: DateTime<Utc>, count: usize) -> Option<Self> {
        let span = (stop - start).num_milliseconds().abs();
        if count == 0 || span == 0 {
            return None;
        }
        let target = span as f64 / count as f64;
        match CANDIDATES.iter().position(|(_, ms)| *ms as f64 > target) {
            Some(0) => Some(TimeInterval::Days(1)),
            Some(i) => {
                let (previous, previous_ms) = CANDIDATES[i - 1];
                let (next, next_ms) = CANDIDATES[i];
                if target / (previous_ms as f64) < next_ms as f64 / target {
                    Some(previous)
                } else {
                    Some(next)
                }
            }
            None => {
                let years = TickStep::new(
                    start.timestamp_millis() as f64 / YEAR_MILLIS as f64,
                    stop.timestamp_millis() as f64 / YEAR_MILLIS as f64,
                    count,
                )
                .map_or(1.0, |step| step.size().round().max(1.0));
                Some(TimeInterval::Years(years as i32))
            }
        }
    }

    /// Instants in `start..=stop` (or the reverse) that fall on this interval.
    pub fn ticks(&self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let (lo, hi) = if start <= stop {
            (start, stop)
        } else {
            (stop, start)
        };
        let mut ticks = Vec::new();
        let mut date = Some(self.floor(lo.date_naive()));
        while let Some(day) = date {
            let instant = midnight(day);
            if instant > hi {
                break;
            }
            if instant >= lo && self.is_aligned(day) {
                ticks.push(instant);
            }
            date = self.next(day);
        }
        if start > stop {
            ticks.reverse();
        }
        ticks
    }

    fn floor(&self, day: NaiveDate) -> NaiveDate {
        match self {
            TimeInterval::Days(_) => day,
            TimeInterval::Week => day
                .checked_sub_days(Days::new(day.weekday().num_days_from_sunday().into()))
                .unwrap_or(day),
            TimeInterval::Months(_) => day.with_day(1).unwrap_or(day),
            TimeInterval::Years(_) => NaiveDate::from_ymd_opt(day.year(), 1, 1).unwrap_or(day),
        }
    }

    fn next(&self, day: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeInterval::Days(_) => day.succ_opt(),
            TimeInterval::Week => day.checked_add_days(Days::new(7)),
            TimeInterval::Months(_) => day.checked_add_months(Months::new(1)),
            TimeInterval::Years(_) => NaiveDate::from_ymd_opt(day.year() + 1, 1, 1),
        }
    }

    fn is_aligned(&self, day: NaiveDate) -> bool {
        match *self {
            TimeInterval::Days(n) => day.day0() % n.max(1) == 0,
            TimeInterval::Week => true,
            TimeInterval::Months(n) => day.month0() % n.max(1) == 0,
            TimeInterval::Years(n) => day.year().rem_euclid(n.max(1)) == 0,
        }
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Short label for a tick, as coarse as the instant allows: a year for the
/// first of January, a month name for the first of a month, a day otherwise.
pub fn tick_label(instant: DateTime<Utc>) -> String {
    let day = instant.date_naive();
    let format = if instant.num_seconds_from_midnight() != 0 {
        "%H:%M"
    } else if day.day() != 1 {
        if day.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if day.month() != 1 {
        "%b"
    } else {
        "%Y"
    };
    instant.format(format).to_string()
}

/// Maps a span of time onto a continuous range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcScale {
    domain: (DateTime<Utc>, DateTime<Utc>),
    range: (f64, f64),
}

impl UtcScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, instant: DateTime<Utc>) -> f64 {
        let d0 = self.domain.0.timestamp_millis();
        let d1 = self.domain.1.timestamp_millis();
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        let t = (instant.timestamp_millis() - d0) as f64 / (d1 - d0) as f64;
        r0 + t * (r1 - r0)
    }

    pub fn interval(&self, count: usize) -> Option<TimeInterval> {
        TimeInterval::for_span(self.domain.0, self.domain.1, count)
    }

    /// Approximately `count` ticks aligned to calendar boundaries.
    pub fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        match self.interval(count) {
            Some(interval) => interval.ticks(self.domain.0, self.domain.1),
            None => vec![],
        }
    }
}
