//! Temporal support: durations and calendar arithmetic
//!
//! Dates, times and datetimes are stored as plain chrono values on
//! [`CypherValue`](crate::CypherValue). Durations are kept component-wise
//! (months, days, seconds, nanoseconds) because a month or a day has no fixed
//! length until it is applied to a calendar point.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    TimeZone, Timelike,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;
/// Days a month spills into when a duration is divided
const DAYS_PER_MONTH: i64 = 30;

/// A Cypher duration.
///
/// `nanos` is always normalized into `0..1_000_000_000`; the sign of the
/// sub-day part lives in `seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CypherDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanos: i64,
}

impl CypherDuration {
    /// Build a duration, carrying excess nanoseconds into seconds
    pub fn new(months: i64, days: i64, seconds: i64, nanos: i64) -> Self {
        let carry = nanos.div_euclid(NANOS_PER_SECOND as i64);
        Self {
            months,
            days,
            seconds: seconds.saturating_add(carry),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND as i64),
        }
    }

    /// Build from wide intermediate parts, `None` if anything overflows
    fn from_parts(months: i64, days: i64, seconds: i128, nanos: i128) -> Option<Self> {
        let total = seconds.checked_mul(NANOS_PER_SECOND)?.checked_add(nanos)?;
        Some(Self {
            months,
            days,
            seconds: i64::try_from(total.div_euclid(NANOS_PER_SECOND)).ok()?,
            nanos: i64::try_from(total.rem_euclid(NANOS_PER_SECOND)).ok()?,
        })
    }

    pub fn months(months: i64) -> Self {
        Self::new(months, 0, 0, 0)
    }

    pub fn days(days: i64) -> Self {
        Self::new(0, days, 0, 0)
    }

    pub fn seconds(seconds: i64) -> Self {
        Self::new(0, 0, seconds, 0)
    }

    /// Check if every component is zero
    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.seconds == 0 && self.nanos == 0
    }

    // === Arithmetic ===

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Self::from_parts(
            self.months.checked_add(other.months)?,
            self.days.checked_add(other.days)?,
            i128::from(self.seconds) + i128::from(other.seconds),
            i128::from(self.nanos) + i128::from(other.nanos),
        )
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.checked_add(&other.checked_neg()?)
    }

    pub fn checked_neg(&self) -> Option<Self> {
        Self::from_parts(
            self.months.checked_neg()?,
            self.days.checked_neg()?,
            -i128::from(self.seconds),
            -i128::from(self.nanos),
        )
    }

    /// Multiply every component by an integer factor
    pub fn checked_mul(&self, factor: i64) -> Option<Self> {
        let factor_wide = i128::from(factor);
        Self::from_parts(
            self.months.checked_mul(factor)?,
            self.days.checked_mul(factor)?,
            i128::from(self.seconds).checked_mul(factor_wide)?,
            i128::from(self.nanos).checked_mul(factor_wide)?,
        )
    }

    /// Divide by an integer.
    ///
    /// The remainder of each component spills into the next finer one
    /// (a month counts as 30 days, a day as 86400 seconds). Returns `None`
    /// for a zero divisor or on overflow.
    pub fn checked_div(&self, divisor: i64) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        let divisor = i128::from(divisor);

        let months = i128::from(self.months);
        let days = i128::from(self.days) + (months % divisor) * i128::from(DAYS_PER_MONTH);
        let seconds = i128::from(self.seconds) + (days % divisor) * i128::from(SECONDS_PER_DAY);
        let nanos = i128::from(self.nanos) + (seconds % divisor) * NANOS_PER_SECOND;

        Self::from_parts(
            i64::try_from(months / divisor).ok()?,
            i64::try_from(days / divisor).ok()?,
            seconds / divisor,
            nanos / divisor,
        )
    }

    fn sub_day_delta(&self) -> Option<TimeDelta> {
        let whole = TimeDelta::try_seconds(self.seconds)?;
        whole.checked_add(&TimeDelta::nanoseconds(self.nanos))
    }

    // === Applying to calendar points ===

    /// Shift a date. Whole days contained in the seconds part are applied,
    /// the remaining time of day is dropped.
    pub fn add_to_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        let shifted = shift_months(date, self.months)?;
        let days = self.days.checked_add(self.seconds / SECONDS_PER_DAY)?;
        shift_days(shifted, days)
    }

    /// Shift a time of day, wrapping around midnight. Months and days are ignored.
    pub fn add_to_time(&self, time: NaiveTime) -> Option<NaiveTime> {
        let delta = self.sub_day_delta()?;
        let (shifted, _) = time.overflowing_add_signed(delta);
        Some(shifted)
    }

    /// Shift a local datetime
    pub fn add_to_local_datetime(&self, datetime: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = shift_days(shift_months(datetime.date(), self.months)?, self.days)?;
        date.and_time(datetime.time())
            .checked_add_signed(self.sub_day_delta()?)
    }

    /// Shift a zoned datetime, keeping its offset
    pub fn add_to_datetime(&self, datetime: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        let local = self.add_to_local_datetime(datetime.naive_local())?;
        datetime.offset().from_local_datetime(&local).single()
    }

    /// Named component, as exposed through property access (`d.days`)
    pub fn component(&self, key: &str) -> Option<i64> {
        let value = match key {
            "years" => self.months / 12,
            "quarters" => self.months / 3,
            "months" => self.months,
            "monthsOfYear" => self.months % 12,
            "weeks" => self.days / 7,
            "days" => self.days,
            "hours" => self.seconds / 3600,
            "minutes" => self.seconds / 60,
            "minutesOfHour" => (self.seconds / 60) % 60,
            "seconds" => self.seconds,
            "secondsOfMinute" => self.seconds % 60,
            "milliseconds" => self.seconds.checked_mul(1_000)?.checked_add(self.nanos / 1_000_000)?,
            "nanoseconds" => self.seconds.checked_mul(1_000_000_000)?.checked_add(self.nanos)?,
            "nanosecondsOfSecond" => self.nanos,
            _ => return None,
        };
        Some(value)
    }
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

impl fmt::Display for CypherDuration {
    /// ISO 8601 rendering, e.g. `P1Y2M3DT4H5M6.5S`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        let years = self.months / 12;
        let months = self.months % 12;
        if years != 0 {
            write!(f, "{years}Y")?;
        }
        if months != 0 {
            write!(f, "{months}M")?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }

        let total = i128::from(self.seconds) * NANOS_PER_SECOND + i128::from(self.nanos);
        if total == 0 {
            return Ok(());
        }
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        let hours = total / (3600 * NANOS_PER_SECOND);
        let minutes = (total / (60 * NANOS_PER_SECOND)) % 60;
        let seconds = (total / NANOS_PER_SECOND) % 60;
        let fraction = total % NANOS_PER_SECOND;

        f.write_str("T")?;
        if hours != 0 {
            write!(f, "{sign}{hours}H")?;
        }
        if minutes != 0 {
            write!(f, "{sign}{minutes}M")?;
        }
        if seconds != 0 || fraction != 0 {
            write!(f, "{sign}{seconds}")?;
            if fraction != 0 {
                let digits = format!("{fraction:09}");
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            f.write_str("S")?;
        }
        Ok(())
    }
}

// ============================================================================
// Calendar accessors
// ============================================================================

/// Named component of a date (`year`, `month`, `day`, ...)
pub fn date_component(date: &NaiveDate, key: &str) -> Option<i64> {
    let value = match key {
        "year" => i64::from(date.year()),
        "quarter" => i64::from(date.month0() / 3 + 1),
        "month" => i64::from(date.month()),
        "week" => i64::from(date.iso_week().week()),
        "day" => i64::from(date.day()),
        "ordinalDay" => i64::from(date.ordinal()),
        "dayOfWeek" => i64::from(date.weekday().number_from_monday()),
        _ => return None,
    };
    Some(value)
}

/// Named component of a time of day (`hour`, `minute`, `second`, ...)
pub fn time_component(time: &NaiveTime, key: &str) -> Option<i64> {
    let nanos = i64::from(time.nanosecond());
    let value = match key {
        "hour" => i64::from(time.hour()),
        "minute" => i64::from(time.minute()),
        "second" => i64::from(time.second()),
        "millisecond" => nanos / 1_000_000,
        "microsecond" => nanos / 1_000,
        "nanosecond" => nanos,
        _ => return None,
    };
    Some(value)
}
