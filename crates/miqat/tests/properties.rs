use chrono::{Duration, NaiveDate};
use miqat::prelude::*;
use proptest::prelude::*;

fn date_from(days: i64) -> NaiveDate {
    // Base date 1900-01-01
    let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    base.checked_add_signed(Duration::days(days)).unwrap()
}

proptest! {
    /// Calculation never panics and always yields times, for any location and date.
    #[test]
    fn prayer_times_are_total(
        lat in -90.0f64..=90.0,
        lng in -180.0f64..=180.0,
        days in 0i64..73000,
    ) {
        let date = date_from(days);
        let times = calculate_prayer_times(date, GeoCoordinate::new_unchecked(lat, lng), &PrayerParams::default());
        prop_assert_eq!(times.date, date);
        prop_assert!(times.clamped.len() <= 5);
    }

    /// Out-of-range and non-finite coordinates are normalized, not propagated.
    #[test]
    fn unchecked_coordinates_do_not_panic(
        lat in prop::num::f64::ANY,
        lng in prop::num::f64::ANY,
        days in 0i64..73000,
    ) {
        let times = calculate_prayer_times(date_from(days), GeoCoordinate::new_unchecked(lat, lng), &PrayerParams::default());
        let _ = next_prayer(&times, times.dhuhr);
    }

    /// Outside polar regions the five prayers are strictly ordered.
    #[test]
    fn prayers_strictly_ordered_below_45(
        lat in -44.9f64..44.9,
        lng in -180.0f64..180.0,
        days in 0i64..73000,
    ) {
        let times = calculate_prayer_times(date_from(days), GeoCoordinate::new(lat, lng).unwrap(), &PrayerParams::default());
        prop_assert!(!times.is_degenerate());
        prop_assert!(times.fajr < times.dhuhr);
        prop_assert!(times.dhuhr < times.asr);
        prop_assert!(times.asr < times.maghrib);
        prop_assert!(times.maghrib < times.isha);
    }

    /// Same inputs, same outputs.
    #[test]
    fn calculation_is_deterministic(lat in -60.0f64..60.0, lng in -180.0f64..180.0, days in 0i64..73000) {
        let date = date_from(days);
        let coords = GeoCoordinate::new(lat, lng).unwrap();
        prop_assert_eq!(
            calculate_prayer_times(date, coords, &PrayerParams::default()),
            calculate_prayer_times(date, coords, &PrayerParams::default())
        );
        prop_assert_eq!(gregorian_to_hijri(date), gregorian_to_hijri(date));
    }

    /// Hijri dates advance by exactly one day, or wrap to the 1st of the next month.
    #[test]
    fn hijri_advances_monotonically(days in 0i64..73000) {
        let today = gregorian_to_hijri(date_from(days)).unwrap();
        let tomorrow = gregorian_to_hijri(date_from(days + 1)).unwrap();

        prop_assert!((1..=30).contains(&today.day));
        prop_assert!((1..=12).contains(&today.month));
        if tomorrow.day == 1 {
            let wrapped = if today.month == 12 {
                tomorrow.month == 1 && tomorrow.year == today.year + 1
            } else {
                tomorrow.month == today.month + 1 && tomorrow.year == today.year
            };
            prop_assert!(wrapped, "{} -> {}", today, tomorrow);
        } else {
            prop_assert_eq!(tomorrow.day, today.day + 1);
            prop_assert_eq!(tomorrow.month, today.month);
            prop_assert_eq!(tomorrow.year, today.year);
        }
    }

    /// The next prayer is always strictly in the future with a matching countdown.
    #[test]
    fn next_prayer_is_in_future(
        lat in -44.9f64..44.9,
        lng in -180.0f64..180.0,
        days in 0i64..73000,
        seconds in 0u32..86400,
    ) {
        let date = date_from(days);
        let now = date.and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(seconds as i64);
        let engine = SolarEngine::default();
        let next = engine.next_prayer(GeoCoordinate::new(lat, lng).unwrap(), now).unwrap();

        prop_assert!(next.time > now);
        prop_assert_eq!(&next.countdown, &miqat::format_countdown(next.time - now));
    }
}
