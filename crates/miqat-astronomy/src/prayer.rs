//! Prayer Times Calculation Module.
//!
//! Computes Fajr, Dhuhr, Asr (Shafi), Maghrib and Isha from the solar
//! declination and hour angle. Offsets are measured from 12:00 local civil
//! time at 4 minutes per degree of hour angle.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use miqat_types::{GeoCoordinate, Prayer, PrayerParams, PrayerTimes};
use smallvec::SmallVec;
use tracing::debug;

use crate::solar::{hour_angle, shafi_asr_altitude, solar_declination, HourAngle};

/// The Earth turns one degree every four minutes.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Calculates prayer times for a given date and location.
///
/// # Arguments
/// * `date` - The caller's local civil date
/// * `coords` - Geographic coordinates (normalized before use)
/// * `params` - Fajr and Isha sun altitudes
///
/// # Returns
/// `PrayerTimes` anchored to `date`. No timezone lookup is done: 12:00 is the
/// local noon of whatever zone `date` was taken in. Prayers whose altitude the
/// sun never reaches are listed in `PrayerTimes::clamped`.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_types::{GeoCoordinate, PrayerParams};
/// use miqat_astronomy::calculate_prayer_times;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let cairo = GeoCoordinate::new(30.0444, 31.2357).unwrap();
///
/// let times = calculate_prayer_times(date, cairo, &PrayerParams::default());
/// assert!(times.fajr < times.dhuhr && times.dhuhr < times.asr);
/// ```
pub fn calculate_prayer_times(date: NaiveDate, coords: GeoCoordinate, params: &PrayerParams) -> PrayerTimes {
    let here = coords.normalized();
    let declination = solar_declination(date.ordinal());
    let noon = shift(date.and_time(NaiveTime::MIN), 12.0 * 60.0);
    let longitude_correction = here.lng / 15.0 * MINUTES_PER_DEGREE;

    let mut clamped: SmallVec<[Prayer; 5]> = SmallVec::new();

    let fajr_offset = offset_minutes(Prayer::Fajr, hour_angle(here.lat, declination, params.fajr_angle), &mut clamped);
    let asr_offset = match shafi_asr_altitude(here.lat, declination) {
        Some(altitude) => offset_minutes(Prayer::Asr, hour_angle(here.lat, declination, altitude), &mut clamped),
        None => {
            clamped.push(Prayer::Asr);
            0.0
        }
    };
    let maghrib_offset = offset_minutes(Prayer::Maghrib, hour_angle(here.lat, declination, 0.0), &mut clamped);
    let isha_offset = offset_minutes(Prayer::Isha, hour_angle(here.lat, declination, params.isha_angle), &mut clamped);

    let dhuhr = shift(noon, longitude_correction);
    let fajr = shift(noon, longitude_correction - fajr_offset);

    if !clamped.is_empty() {
        debug!(%date, lat = here.lat, lng = here.lng, ?clamped, "sun altitude not reached, prayer times saturated");
    }

    PrayerTimes {
        date,
        coords,
        params: *params,
        fajr,
        dhuhr,
        asr: shift(dhuhr, asr_offset),
        maghrib: shift(dhuhr, maghrib_offset),
        isha: shift(dhuhr, isha_offset),
        clamped,
    }
}

/// Calculates prayer times with the default (-18° / -17°) angles.
pub fn calculate_default(date: NaiveDate, coords: GeoCoordinate) -> PrayerTimes {
    calculate_prayer_times(date, coords, &PrayerParams::default())
}

fn offset_minutes(prayer: Prayer, angle: HourAngle, clamped: &mut SmallVec<[Prayer; 5]>) -> f64 {
    if angle.saturated {
        clamped.push(prayer);
    }
    angle.degrees * MINUTES_PER_DEGREE
}

/// Adds fractional minutes at millisecond resolution, saturating at the calendar bounds.
fn shift(base: NaiveDateTime, minutes: f64) -> NaiveDateTime {
    let delta = Duration::milliseconds((minutes * 60_000.0).round() as i64);
    base.checked_add_signed(delta).unwrap_or(if minutes < 0.0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}
