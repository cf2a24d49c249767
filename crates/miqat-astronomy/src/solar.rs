//! Solar declination and hour-angle helpers. All angles in degrees.

use std::f64::consts::PI;

/// Maximum tilt used by the declination approximation.
pub const AXIAL_TILT: f64 = 23.45;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Single-harmonic solar declination for a 1-based day of the year.
pub fn solar_declination(day_of_year: u32) -> f64 {
    AXIAL_TILT * deg_to_rad(360.0 * (284.0 + f64::from(day_of_year)) / 365.0).sin()
}

/// Result of an hour-angle evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourAngle {
    /// Angular distance from solar noon, in [0, 180].
    pub degrees: f64,
    /// The sun never reaches the target altitude on this day; `degrees` is 0 or 180.
    pub saturated: bool,
}

/// Hour angle at which the sun stands at `altitude`.
///
/// The `acos` argument is clamped to [-1, 1]. A vanishing denominator
/// (observer at a pole) saturates rather than dividing by zero.
pub fn hour_angle(lat: f64, declination: f64, altitude: f64) -> HourAngle {
    let (lat, dec, alt) = (deg_to_rad(lat), deg_to_rad(declination), deg_to_rad(altitude));
    let numerator = alt.sin() - lat.sin() * dec.sin();
    let denominator = lat.cos() * dec.cos();

    let ratio = if denominator.abs() < f64::EPSILON {
        f64::INFINITY.copysign(numerator)
    } else {
        numerator / denominator
    };

    let saturated = !(-1.0..=1.0).contains(&ratio);
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(-1.0, 1.0) };

    HourAngle { degrees: rad_to_deg(ratio.acos()), saturated }
}

/// Sun altitude at Asr (Shafi): shadow length = object height + noon shadow.
///
/// Returns `None` when the sun stays below the horizon at noon.
pub fn shafi_asr_altitude(lat: f64, declination: f64) -> Option<f64> {
    let noon_zenith = (lat - declination).abs();
    if noon_zenith >= 90.0 {
        return None;
    }
    let shadow_ratio = 1.0 + deg_to_rad(noon_zenith).tan();
    Some(rad_to_deg(shadow_ratio.recip().atan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_conversions() {
        assert!(close(deg_to_rad(180.0), PI, 1e-12));
        assert!(close(rad_to_deg(PI / 2.0), 90.0, 1e-12));
    }

    #[test]
    fn test_declination_extremes() {
        // Near the June solstice the declination is close to the tilt.
        assert!(close(solar_declination(173), 23.45, 0.01));
        // Near the December solstice it is close to minus the tilt.
        assert!(close(solar_declination(355), -23.45, 0.05));
        // Equinox-ish.
        assert!(solar_declination(81).abs() < 0.5);
    }

    #[test]
    fn test_equator_equinox_sunset_is_quarter_turn() {
        let ha = hour_angle(0.0, 0.0, 0.0);
        assert!(close(ha.degrees, 90.0, 1e-9));
        assert!(!ha.saturated);
    }

    #[test]
    fn test_polar_day_saturates() {
        // 70°N at the June solstice: the sun never sets.
        let ha = hour_angle(70.0, 23.45, 0.0);
        assert!(ha.saturated);
        assert!(close(ha.degrees, 180.0, 1e-9));
    }

    #[test]
    fn test_polar_night_saturates() {
        let ha = hour_angle(70.0, -23.45, 0.0);
        assert!(ha.saturated);
        assert_eq!(ha.degrees, 0.0);
    }

    #[test]
    fn test_pole_does_not_divide_by_zero() {
        let ha = hour_angle(90.0, 10.0, -18.0);
        assert!(ha.degrees.is_finite());
        assert!(ha.saturated);
    }

    #[test]
    fn test_nan_input_is_contained() {
        let ha = hour_angle(10.0, 10.0, f64::NAN);
        assert!(ha.degrees.is_finite());
        assert!(ha.saturated);
    }

    #[test]
    fn test_asr_altitude() {
        // Sun overhead at noon: shadow equals object height, 45°.
        assert!(close(shafi_asr_altitude(10.0, 10.0).unwrap(), 45.0, 1e-9));
        let cairo = shafi_asr_altitude(30.0444, solar_declination(173)).unwrap();
        assert!(cairo > 40.0 && cairo < 43.0, "{}", cairo);
        assert_eq!(shafi_asr_altitude(-80.0, 23.0), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The hour angle stays in [0, 180]; saturation pins it to an end.
            #[test]
            fn hour_angle_bounded(
                lat in -90.0f64..=90.0,
                dec in -AXIAL_TILT..=AXIAL_TILT,
                alt in -30.0f64..=90.0,
            ) {
                let ha = hour_angle(lat, dec, alt);
                prop_assert!(ha.degrees.is_finite());
                prop_assert!((0.0..=180.0).contains(&ha.degrees));
                if ha.saturated {
                    prop_assert!(close(ha.degrees, 0.0, 1e-9) || close(ha.degrees, 180.0, 1e-9));
                }
            }

            /// A higher target altitude is reached closer to noon.
            #[test]
            fn hour_angle_shrinks_with_altitude(
                lat in -89.0f64..=89.0,
                dec in -AXIAL_TILT..=AXIAL_TILT,
                low in -30.0f64..=60.0,
                rise in 0.0f64..=30.0,
            ) {
                let lower = hour_angle(lat, dec, low);
                let higher = hour_angle(lat, dec, low + rise);
                prop_assert!(higher.degrees <= lower.degrees + 1e-9);
            }
        }
    }
}
