//! Calendar rule engine: occurrence dates for each [`RecurrenceRule`] within a date range.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::trace;

use forecast_domain::RecurrenceRule;

/// Upper bound on months walked by a single monthly-rule query.
pub const MAX_MONTH_LOOKAHEAD: usize = 1200;

/// Number of calendar months touched by `[start, end]`, counting both end months.
pub fn months_spanned(start: NaiveDate, end: NaiveDate) -> usize {
    let months = (i64::from(end.year()) - i64::from(start.year())) * 12 + i64::from(end.month())
        - i64::from(start.month())
        + 1;
    usize::try_from(months).unwrap_or(0)
}

/// Returns the ordered, duplicate-free dates in `[start, end]` on which `rule` fires.
///
/// Malformed rules (non-positive period, `n == 0`, day outside 1..=31) yield no dates.
pub fn compute_occurrences(rule: &RecurrenceRule, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    match *rule {
        RecurrenceRule::Interval {
            anchor,
            period_days,
        } => interval_occurrences(anchor, period_days, start, end),
        RecurrenceRule::NthWeekdayOfMonth { weekday, n } => {
            if n == 0 {
                trace!(?weekday, "ignoring nth-weekday rule with n = 0");
                return Vec::new();
            }
            monthly_occurrences(start, end, |year, month| {
                nth_weekday_of_month(year, month, weekday, n)
            })
        }
        RecurrenceRule::DayOfMonth { day } => {
            if !(1..=31).contains(&day) {
                trace!(day, "ignoring day-of-month rule outside 1..=31");
                return Vec::new();
            }
            monthly_occurrences(start, end, |year, month| {
                NaiveDate::from_ymd_opt(year, month, day)
            })
        }
    }
}

/// First interval boundary at or after `start`. The anchor itself is the first occurrence.
pub fn first_on_or_after(anchor: NaiveDate, period_days: i64, start: NaiveDate) -> Option<NaiveDate> {
    if period_days <= 0 {
        return None;
    }
    if start <= anchor {
        return Some(anchor);
    }
    let elapsed = (start - anchor).num_days();
    let whole_periods = elapsed.div_euclid(period_days);
    let boundary = anchor.checked_add_signed(Duration::try_days(whole_periods * period_days)?)?;
    if boundary < start {
        boundary.checked_add_signed(Duration::try_days(period_days)?)
    } else {
        Some(boundary)
    }
}

/// The `n`-th `weekday` of the month, or `None` when it falls outside the month.
///
/// The first `weekday` of any month lands on day 1..=7, so the 4th lands on day 22..=28 and
/// always exists. Only `n >= 5` can spill into the following month; those months are skipped.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday()
        - first_of_month.weekday().num_days_from_monday())
        % 7;
    let first = first_of_month + Duration::days(offset as i64);
    let candidate = first.checked_add_signed(Duration::try_weeks((n - 1) as i64)?)?;
    (candidate.month() == month).then_some(candidate)
}

fn interval_occurrences(
    anchor: NaiveDate,
    period_days: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    let Some(step) = Duration::try_days(period_days).filter(|_| period_days > 0) else {
        trace!(period_days, "ignoring interval rule with non-positive period");
        return Vec::new();
    };
    let Some(first) = first_on_or_after(anchor, period_days, start) else {
        return Vec::new();
    };
    std::iter::successors(Some(first), |date| date.checked_add_signed(step))
        .take_while(|date| *date <= end)
        .collect()
}

fn monthly_occurrences<F>(start: NaiveDate, end: NaiveDate, mut occurrence_in: F) -> Vec<NaiveDate>
where
    F: FnMut(i32, u32) -> Option<NaiveDate>,
{
    let mut dates = Vec::new();
    let last = (end.year(), end.month());
    let (mut year, mut month) = (start.year(), start.month());
    for _ in 0..MAX_MONTH_LOOKAHEAD {
        if (year, month) > last {
            break;
        }
        if let Some(date) = occurrence_in(year, month) {
            if start <= date && date <= end {
                dates.push(date);
            }
        }
        (year, month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
    }
    dates
}
