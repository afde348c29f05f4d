use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Whether the pair is a position on earth. AIS encodes an unknown position
/// as latitude 91 and longitude 181, which this rejects.
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Great-circle distance in meters on a sphere of radius [`EARTH_RADIUS_M`].
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Axis aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl GeoBounds {
    pub fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Bounds containing nothing. Extending it with a point yields the point.
    pub fn empty() -> Self {
        Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY)
    }

    pub fn is_empty(&self) -> bool {
        self.min_latitude > self.max_latitude || self.min_longitude > self.max_longitude
    }

    pub fn extend(&mut self, latitude: f64, longitude: f64) {
        self.min_latitude = self.min_latitude.min(latitude);
        self.max_latitude = self.max_latitude.max(latitude);
        self.min_longitude = self.min_longitude.min(longitude);
        self.max_longitude = self.max_longitude.max(longitude);
    }

    pub fn merge(self, other: GeoBounds) -> GeoBounds {
        if other.is_empty() {
            return self;
        }
        let mut merged = self;
        merged.extend(other.min_latitude, other.min_longitude);
        merged.extend(other.max_latitude, other.max_longitude);
        merged
    }

    /// Strict interior test, points on the border are outside.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude > self.min_latitude
            && latitude < self.max_latitude
            && longitude > self.min_longitude
            && longitude < self.max_longitude
    }

    /// Square region of `radius_m` meters around a point. Longitude bounds
    /// are widened with latitude.
    pub fn around(latitude: f64, longitude: f64, radius_m: f64) -> GeoBounds {
        let lat_rad = to_radians(latitude);
        let lon_rad = to_radians(longitude);

        let dlat = radius_m / EARTH_RADIUS_M;
        let dlon = radius_m / (EARTH_RADIUS_M * lat_rad.cos());

        GeoBounds::new(
            to_degrees(lat_rad - dlat),
            to_degrees(lat_rad + dlat),
            to_degrees(lon_rad - dlon),
            to_degrees(lon_rad + dlon),
        )
    }

    /// Grows degenerate extents (a single point, a meridian) to `radius_m`
    /// meters around their center so they can be used as plot axes.
    pub fn padded(self, radius_m: f64) -> GeoBounds {
        let around = GeoBounds::around(
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
            radius_m,
        );
        let mut padded = self;
        if padded.max_latitude - padded.min_latitude < f64::EPSILON {
            padded.min_latitude = around.min_latitude;
            padded.max_latitude = around.max_latitude;
        }
        if padded.max_longitude - padded.min_longitude < f64::EPSILON {
            padded.min_longitude = around.min_longitude;
            padded.max_longitude = around.max_longitude;
        }
        padded
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<(f64, f64)> for GeoBounds {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut bounds = GeoBounds::empty();
        for (latitude, longitude) in iter {
            bounds.extend(latitude, longitude);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_is_zero_for_identical_points() {
        assert_eq!(haversine_distance(54.32, 10.13, 54.32, 10.13), 0.0);
    }

    #[test]
    fn haversine_kiel_to_copenhagen() {
        // roughly 216 km
        let distance = haversine_distance(54.3233, 10.1228, 55.6761, 12.5683);
        assert!((distance - 216_000.0).abs() < 10_000.0, "{distance}");
    }

    #[test]
    fn unavailable_position_is_not_a_coordinate() {
        assert!(is_valid_coordinate(57.0, 10.5));
        assert!(is_valid_coordinate(-90.0, 180.0));
        assert!(!is_valid_coordinate(91.0, 10.5));
        assert!(!is_valid_coordinate(57.0, 181.0));
        assert!(!is_valid_coordinate(57.0, -180.5));
    }

    #[test]
    fn haversine_is_symmetric() {
        let there = haversine_distance(57.0, 9.5, 56.6, 11.8);
        let back = haversine_distance(56.6, 11.8, 57.0, 9.5);
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn bounds_extend_and_merge() {
        let a: GeoBounds = [(56.0, 9.0), (57.0, 10.0)].into_iter().collect();
        let b: GeoBounds = [(55.5, 11.0)].into_iter().collect();
        let merged = a.merge(b);
        assert_eq!(merged, GeoBounds::new(55.5, 57.0, 9.0, 11.0));
        assert_eq!(a.merge(GeoBounds::empty()), a);
    }

    #[test]
    fn contains_excludes_border() {
        let bounds = GeoBounds::new(56.0, 58.0, 9.0, 12.0);
        assert!(bounds.contains(57.0, 10.0));
        assert!(!bounds.contains(56.0, 10.0));
        assert!(!bounds.contains(57.0, 12.5));
    }

    #[test]
    fn empty_bounds() {
        assert!(GeoBounds::empty().is_empty());
        assert!(!GeoBounds::from_iter([(1.0, 2.0)]).is_empty());
    }

    #[test]
    fn padded_single_point() {
        let bounds = GeoBounds::from_iter([(56.0, 10.0)]).padded(1_000.0);
        assert!(bounds.contains(56.0, 10.0));
        assert!(bounds.max_latitude - bounds.min_latitude > 0.017);
    }

    #[test]
    fn around_is_wider_in_longitude_up_north() {
        let bounds = GeoBounds::around(57.0, 10.5, 5_000.0);
        assert!(bounds.contains(57.0, 10.5));
        let height = bounds.max_latitude - bounds.min_latitude;
        let width = bounds.max_longitude - bounds.min_longitude;
        assert!(width > height);
    }
}
