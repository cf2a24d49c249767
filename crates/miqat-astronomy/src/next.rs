//! Next-prayer resolution and countdown formatting.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use miqat_types::{NextPrayer, Prayer, PrayerTimes};
use std::convert::Infallible;

use crate::prayer::calculate_prayer_times;

/// Days looked at past the reference day before giving up on a later prayer.
const MAX_ROLLOVER_DAYS: usize = 3;

/// Formats a duration as `HH:MM:SS`, truncated to whole seconds.
///
/// Hours widen beyond two digits past 99. Negative durations render as `00:00:00`.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

/// Finds the next prayer strictly after `now`, recomputing other days locally.
///
/// A prayer whose time equals `now` counts as passed. An evening prayer of the
/// day before `now` that falls past midnight is still ahead and wins. When every
/// prayer in `times` has passed, the following day is computed with the same
/// coordinates and params and its Fajr is returned.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_types::GeoCoordinate;
/// use miqat_astronomy::{calculate_default, next_prayer};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let times = calculate_default(date, GeoCoordinate::new(30.0444, 31.2357).unwrap());
///
/// let next = next_prayer(&times, date.and_hms_opt(13, 0, 0).unwrap());
/// assert_eq!(next.name(), "Asr");
/// ```
pub fn next_prayer(times: &PrayerTimes, now: NaiveDateTime) -> NextPrayer {
    if let Some(previous) = now.date().pred_opt().filter(|d| *d != times.date) {
        let previous = calculate_prayer_times(previous, times.coords, &times.params);
        if let Some(next) = carried_over(&previous, now) {
            return next;
        }
    }

    let resolved = resolve_next(times, now, |date| {
        Ok::<_, Infallible>(calculate_prayer_times(date, times.coords, &times.params))
    });
    match resolved {
        Ok(next) => next,
        Err(never) => match never {},
    }
}

/// A prayer of `previous` (the day before `now`'s date) still ahead of `now`.
///
/// Only evening prayers pushed past midnight qualify.
pub fn carried_over(previous: &PrayerTimes, now: NaiveDateTime) -> Option<NextPrayer> {
    previous
        .first_after(now)
        .map(|(prayer, time)| upcoming(prayer, time, now))
}

/// Finds the next prayer strictly after `now`, asking `times_for` for later days.
///
/// Prayers carried over from the day before `times` are not looked at; check
/// them with [`carried_over`] first.
///
/// If `times` is for a date before `now`'s date, the search restarts at
/// `now`'s date so the result is always the first prayer after `now`. Should
/// no later prayer turn up (saturated geometry), the last Fajr examined is
/// returned with a `00:00:00` countdown.
///
/// # Errors
/// Propagates the first error from `times_for`.
pub fn resolve_next<E, F>(times: &PrayerTimes, now: NaiveDateTime, mut times_for: F) -> Result<NextPrayer, E>
where
    F: FnMut(NaiveDate) -> Result<PrayerTimes, E>,
{
    if let Some((prayer, time)) = times.first_after(now) {
        return Ok(upcoming(prayer, time, now));
    }

    let mut day = times.date.succ_opt().map_or(now.date(), |d| d.max(now.date()));
    let mut last_fajr = times.fajr;

    for _ in 0..MAX_ROLLOVER_DAYS {
        let candidate = times_for(day)?;
        if let Some((prayer, time)) = candidate.first_after(now) {
            return Ok(upcoming(prayer, time, now));
        }
        last_fajr = candidate.fajr;
        day = match day.succ_opt() {
            Some(d) => d,
            None => break,
        };
    }

    Ok(upcoming(Prayer::Fajr, last_fajr, now))
}

fn upcoming(prayer: Prayer, time: NaiveDateTime, now: NaiveDateTime) -> NextPrayer {
    NextPrayer { prayer, time, countdown: format_countdown(time - now) }
}
