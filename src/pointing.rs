use nalgebra::Vector3;
use tracing::debug;

use crate::catalog::SatelliteCatalog;
use crate::observer::{GeoCoordinate, EARTH_RADIUS_KM};

/// Geostationary altitude above the surface (km)
pub const GEOSTATIONARY_ALTITUDE_KM: f64 = 35786.0;

const RADIUS_RATIO: f64 = EARTH_RADIUS_KM / (EARTH_RADIUS_KM + GEOSTATIONARY_ALTITUDE_KM);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingAngles {
    pub elevation: f64,    // degrees
    pub azimuth: f64,      // degrees, [0, 360)
    pub polarization: f64, // degrees, may be negative
    pub range_km: f64,
}

/// Pointing solution ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PointingResult {
    pub satellite: String,
    pub orbital_longitude: String,
    pub elevation: String,
    pub azimuth: String,
    pub polarization: String,
    /// Unrounded azimuth, for rotating a bearing indicator.
    pub azimuth_value: f64,
    pub slant_range_km: f64,
}

/// Pointing angles from `station` to the geostationary slot at
/// `satellite_longitude` (degrees, East positive).
///
/// Singular geometries fall back to fixed values: elevation is 90° when the
/// station sits directly below the slot (or at its antipode), azimuth is 0°
/// when undefined, and polarization is 0° on the equator.
pub fn calculate_pointing_angles(
    satellite_longitude: f64,
    station: &GeoCoordinate,
) -> PointingAngles {
    let phi_e = station.latitude.to_radians();
    let lambda_e = station.longitude.to_radians();
    let lambda_s = satellite_longitude.to_radians();
    let delta_lambda = lambda_s - lambda_e;

    // Geocentric angle between station and sub-satellite point
    let cos_delta_theta = phi_e.cos() * delta_lambda.cos();

    let elevation = elevation_angle(cos_delta_theta);

    // The tan(0) term is always zero but keeps the denominator at +0.0 on the
    // equator, so the sub-satellite point resolves to 0° rather than 180°.
    let azimuth = delta_lambda
        .sin()
        .atan2(phi_e.cos() * 0.0_f64.tan() - phi_e.sin() * delta_lambda.cos());
    let azimuth = if azimuth.is_nan() {
        0.0
    } else {
        normalize_azimuth(azimuth.to_degrees())
    };

    let tan_phi = phi_e.tan();
    let polarization = if tan_phi == 0.0 {
        0.0
    } else {
        let skew = (delta_lambda.sin() / tan_phi).atan();
        if skew.is_nan() {
            0.0
        } else {
            skew.to_degrees()
        }
    };

    PointingAngles {
        elevation,
        azimuth,
        polarization,
        range_km: slant_range(lambda_s, station),
    }
}

fn elevation_angle(cos_delta_theta: f64) -> f64 {
    let sin_delta_theta = (1.0 - cos_delta_theta * cos_delta_theta).sqrt();
    if sin_delta_theta == 0.0 || sin_delta_theta.is_nan() {
        return 90.0;
    }

    let elevation = ((cos_delta_theta - RADIUS_RATIO) / sin_delta_theta).atan();
    if elevation.is_nan() {
        90.0
    } else {
        elevation.to_degrees()
    }
}

fn normalize_azimuth(azimuth: f64) -> f64 {
    let azimuth = if azimuth < 0.0 {
        azimuth + 360.0
    } else {
        azimuth
    };
    // -1e-15 + 360.0 rounds up to 360.0
    if azimuth >= 360.0 {
        azimuth - 360.0
    } else {
        azimuth + 0.0
    }
}

fn slant_range(satellite_longitude_rad: f64, station: &GeoCoordinate) -> f64 {
    let orbit_radius = EARTH_RADIUS_KM + GEOSTATIONARY_ALTITUDE_KM;
    let satellite = Vector3::new(
        orbit_radius * satellite_longitude_rad.cos(),
        orbit_radius * satellite_longitude_rad.sin(),
        0.0,
    );
    (satellite - station.to_ecef()).norm()
}

/// Look up `satellite` in the catalog and compute its pointing solution.
///
/// Returns `None` when the satellite is missing or unknown, its descriptor is
/// malformed, or either coordinate is not a finite number.
pub fn compute(
    catalog: &SatelliteCatalog,
    satellite: Option<&str>,
    latitude: f64,
    longitude: f64,
) -> Option<PointingResult> {
    let station = GeoCoordinate::new(latitude, longitude);
    if !station.is_finite() {
        debug!("Rejected non-finite coordinates ({}, {})", latitude, longitude);
        return None;
    }

    let Some(entry) = satellite.and_then(|name| catalog.get(name)) else {
        debug!("Rejected unknown satellite {:?}", satellite);
        return None;
    };

    let orbital_longitude = match entry.orbital_longitude() {
        Ok(lon) => lon,
        Err(e) => {
            debug!("Rejected {}: {}", entry.name, e);
            return None;
        }
    };

    let angles = calculate_pointing_angles(orbital_longitude.degrees(), &station);
    debug!(
        "{} from ({}, {}): el {:.4} az {:.4} pol {:.4}",
        entry.name, latitude, longitude, angles.elevation, angles.azimuth, angles.polarization
    );

    Some(PointingResult {
        satellite: entry.name.clone(),
        orbital_longitude: orbital_longitude.to_string(),
        elevation: format_angle(angles.elevation),
        azimuth: format_azimuth(angles.azimuth),
        polarization: format_angle(angles.polarization),
        azimuth_value: angles.azimuth,
        slant_range_km: angles.range_km,
    })
}

/// Same as [`compute`], with coordinates given as text.
pub fn compute_from_input(
    catalog: &SatelliteCatalog,
    satellite: Option<&str>,
    latitude: &str,
    longitude: &str,
) -> Option<PointingResult> {
    let Some(station) = GeoCoordinate::from_input(latitude, longitude) else {
        debug!("Rejected coordinates {:?}, {:?}", latitude, longitude);
        return None;
    };
    compute(catalog, satellite, station.latitude, station.longitude)
}

/// Two decimals and a degree sign. Never renders negative zero.
pub fn format_angle(degrees: f64) -> String {
    let degrees = if degrees == 0.0 { 0.0 } else { degrees };
    format!("{:.2}°", degrees)
}

/// Like [`format_angle`], but a bearing that rounds up to 360.00 wraps to 0.00.
pub fn format_azimuth(azimuth: f64) -> String {
    if (azimuth * 100.0).round() >= 36000.0 {
        format_angle(0.0)
    } else {
        format_angle(azimuth)
    }
}

pub fn azimuth_to_cardinal(azimuth: f64) -> &'static str {
    let az = azimuth % 360.0;
    match az {
        a if a >= 337.5 || a < 22.5 => "N",
        a if a >= 22.5 && a < 67.5 => "NE",
        a if a >= 67.5 && a < 112.5 => "E",
        a if a >= 112.5 && a < 157.5 => "SE",
        a if a >= 157.5 && a < 202.5 => "S",
        a if a >= 202.5 && a < 247.5 => "SW",
        a if a >= 247.5 && a < 292.5 => "W",
        a if a >= 292.5 && a < 337.5 => "NW",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SatelliteEntry;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn catalog() -> SatelliteCatalog {
        SatelliteCatalog::builtin()
    }

    fn station(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon)
    }

    #[test]
    fn apstar_9_from_hangzhou_area() {
        let result = compute(&catalog(), Some("Apstar-9"), 30.0, 120.0).unwrap();
        assert_eq!(result.satellite, "Apstar-9");
        assert_eq!(result.orbital_longitude, "142.0E");
        assert_eq!(result.elevation, "47.56°");
        assert_eq!(result.azimuth, "141.06°");
        assert_eq!(result.polarization, "32.98°");
        assert_abs_diff_eq!(result.azimuth_value, 141.05997, epsilon = 1e-4);
        assert!(result.azimuth_value > 90.0 && result.azimuth_value < 180.0);
    }

    #[test]
    fn reference_solutions() {
        let cases = [
            ("Apstar-6D", 39.9, 116.4, "40.19°", "153.00°", "20.38°"),
            ("ChinaSat-16（圆极化）", 22.3, 114.2, "63.55°", "189.67°", "-8.94°"),
            ("EutelSat-172B", -36.8, 174.7, "47.22°", "355.50°", "3.60°"),
            ("Apstar-7", -33.9, 151.2, "3.98°", "278.68°", "55.14°"),
        ];
        for (name, lat, lon, el, az, pol) in cases {
            let result = compute(&catalog(), Some(name), lat, lon).unwrap();
            assert_eq!(result.elevation, el, "{name}");
            assert_eq!(result.azimuth, az, "{name}");
            assert_eq!(result.polarization, pol, "{name}");
        }
    }

    #[test]
    fn western_slot() {
        let mut catalog = catalog();
        catalog.insert(SatelliteEntry::new("West-76.5", "76.5W"));
        let result = compute(&catalog, Some("West-76.5"), 40.7, -74.0).unwrap();
        assert_eq!(result.orbital_longitude, "76.5W");
        assert_eq!(result.elevation, "42.88°");
        assert_eq!(result.azimuth, "183.83°");
        assert_eq!(result.polarization, "-2.90°");
    }

    #[test]
    fn sub_satellite_point_is_zenith() {
        let result = compute(&catalog(), Some("Apstar-9"), 0.0, 142.0).unwrap();
        assert_eq!(result.elevation, "90.00°");
        assert_eq!(result.azimuth, "0.00°");
        assert_eq!(result.polarization, "0.00°");
        assert_relative_eq!(result.slant_range_km, GEOSTATIONARY_ALTITUDE_KM, epsilon = 1e-6);
    }

    #[test]
    fn antipode_falls_back_to_zenith() {
        let angles = calculate_pointing_angles(142.0, &station(0.0, -38.0));
        assert_relative_eq!(angles.elevation, 90.0);
    }

    #[test]
    fn equator_has_zero_polarization() {
        for lon in [-170.0, -30.0, 0.0, 100.0, 141.0, 143.0, 179.5] {
            let result = compute(&catalog(), Some("Apstar-9"), 0.0, lon).unwrap();
            assert_eq!(result.polarization, "0.00°", "lon {lon}");
        }
    }

    #[test]
    fn azimuth_stays_in_range() {
        let catalog = catalog();
        for entry in catalog.entries() {
            for lat in [-89.0, -60.0, -15.5, -0.5, 0.5, 10.0, 45.0, 75.0, 89.0] {
                for lon in [-179.0, -120.0, -45.0, 0.0, 60.0, 110.0, 150.0, 179.0] {
                    let result = compute(&catalog, Some(&entry.name), lat, lon).unwrap();
                    assert!(
                        (0.0..360.0).contains(&result.azimuth_value),
                        "{} ({lat}, {lon}): {}",
                        entry.name,
                        result.azimuth_value
                    );
                }
            }
        }
    }

    #[test]
    fn formatted_angles_have_two_decimals_and_degree_sign() {
        let catalog = catalog();
        for lat in [-80.0, -23.4, 0.0, 12.3, 30.0, 66.6] {
            for lon in [-150.0, -10.0, 0.0, 95.0, 138.0, 175.0] {
                let result = compute(&catalog, Some("Apstar-5C（Telstar 18 Vantage）"), lat, lon)
                    .unwrap();
                for text in [&result.elevation, &result.azimuth, &result.polarization] {
                    let number = text.strip_suffix('°').unwrap();
                    let (_, decimals) = number.split_once('.').unwrap();
                    assert_eq!(decimals.len(), 2, "{text}");
                    assert!(number.parse::<f64>().is_ok(), "{text}");
                }
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = compute(&catalog(), Some("AsiaSat-7"), 31.23, 121.47);
        let b = compute(&catalog(), Some("AsiaSat-7"), 31.23, 121.47);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_satellite() {
        assert!(compute(&catalog(), None, 30.0, 120.0).is_none());
        assert!(compute(&catalog(), Some("Nope-1"), 30.0, 120.0).is_none());
        assert!(compute(&SatelliteCatalog::empty(), Some("Apstar-9"), 30.0, 120.0).is_none());
    }

    #[test]
    fn rejects_malformed_descriptor() {
        let mut catalog = catalog();
        catalog.insert(SatelliteEntry::new("Broken", "142.0X"));
        assert!(compute(&catalog, Some("Broken"), 30.0, 120.0).is_none());
    }

    #[test]
    fn rejects_bad_coordinates() {
        let catalog = catalog();
        assert!(compute(&catalog, Some("Apstar-9"), f64::NAN, 120.0).is_none());
        assert!(compute(&catalog, Some("Apstar-9"), 30.0, f64::INFINITY).is_none());
        assert!(compute(&catalog, None, f64::NAN, f64::NAN).is_none());
        assert!(compute_from_input(&catalog, Some("Apstar-9"), "abc", "120").is_none());
        assert!(compute_from_input(&catalog, Some("Apstar-9"), "30", "").is_none());
        assert!(compute_from_input(&catalog, Some("Nope-1"), "x", "y").is_none());
    }

    #[test]
    fn text_input_matches_numeric_input() {
        let catalog = catalog();
        let from_text = compute_from_input(&catalog, Some("Apstar-9"), " 30.00", "120.00 ");
        let from_numbers = compute(&catalog, Some("Apstar-9"), 30.0, 120.0);
        assert_eq!(from_text, from_numbers);
    }

    #[test]
    fn slant_range_follows_law_of_cosines() {
        let s = station(30.0, 120.0);
        let angles = calculate_pointing_angles(142.0, &s);
        let orbit_radius = EARTH_RADIUS_KM + GEOSTATIONARY_ALTITUDE_KM;
        let cos_delta_theta = 30.0_f64.to_radians().cos() * 22.0_f64.to_radians().cos();
        let expected = (EARTH_RADIUS_KM.powi(2) + orbit_radius.powi(2)
            - 2.0 * EARTH_RADIUS_KM * orbit_radius * cos_delta_theta)
            .sqrt();
        assert_relative_eq!(angles.range_km, expected, epsilon = 1e-6);
    }

    #[test]
    fn format_angle_drops_negative_zero() {
        assert_eq!(format_angle(-0.0), "0.00°");
        assert_eq!(format_angle(12.345678), "12.35°");
        assert_eq!(format_angle(-3.0), "-3.00°");
    }

    #[test]
    fn azimuth_just_below_north_displays_as_zero() {
        let result = compute(&catalog(), Some("Apstar-9"), -30.0, 142.002).unwrap();
        assert!(result.azimuth_value > 359.99 && result.azimuth_value < 360.0);
        assert_eq!(result.azimuth, "0.00°");

        assert_eq!(format_azimuth(359.994), "359.99°");
        assert_eq!(format_azimuth(359.996), "0.00°");
        assert_eq!(format_azimuth(0.0), "0.00°");
    }

    #[test]
    fn cardinal_directions() {
        assert_eq!(azimuth_to_cardinal(0.0), "N");
        assert_eq!(azimuth_to_cardinal(141.06), "SE");
        assert_eq!(azimuth_to_cardinal(183.8), "S");
        assert_eq!(azimuth_to_cardinal(355.5), "N");
    }
}
