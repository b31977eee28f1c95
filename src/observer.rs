use nalgebra::Vector3;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Ground station position. Coordinates are not range-checked; out-of-range
/// values give well-defined but meaningless pointing angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,  // degrees
    pub longitude: f64, // degrees
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Build a position from text fields, as typed into a form.
    pub fn from_input(lat: &str, lon: &str) -> Option<Self> {
        Some(Self::new(parse_coordinate(lat)?, parse_coordinate(lon)?))
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    // Earth-centred position on a spherical Earth (km)
    pub fn to_ecef(&self) -> Vector3<f64> {
        let lat_rad = self.latitude.to_radians();
        let lon_rad = self.longitude.to_radians();

        Vector3::new(
            EARTH_RADIUS_KM * lat_rad.cos() * lon_rad.cos(),
            EARTH_RADIUS_KM * lat_rad.cos() * lon_rad.sin(),
            EARTH_RADIUS_KM * lat_rad.sin(),
        )
    }
}

/// Parse a coordinate in degrees. Only finite numbers are accepted.
pub fn parse_coordinate(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
