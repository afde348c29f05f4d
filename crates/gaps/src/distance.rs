use geo::{GeodesicDistance, Point};
use itertools::Itertools;
use model::TrackPoint;
use serde::{Deserialize, Serialize};
use utility::geo::haversine_distance;

/// Formula used for the distance between consecutive position reports.
///
/// `Geodesic` is the WGS-84 ellipsoidal distance (Karney's algorithm), the
/// default. `Haversine` assumes a sphere of radius 6371 km and differs from it
/// by up to ~0.5%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    #[default]
    Geodesic,
    Haversine,
}

impl DistanceMethod {
    /// Distance in meters.
    pub fn distance(self, a: &TrackPoint, b: &TrackPoint) -> f64 {
        match self {
            DistanceMethod::Geodesic => Point::new(a.longitude, a.latitude)
                .geodesic_distance(&Point::new(b.longitude, b.latitude)),
            DistanceMethod::Haversine => {
                haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
            }
        }
    }

    /// Running sum of the distances between consecutive points, one value per
    /// point, starting with `0.0`.
    pub fn cumulative(self, points: &[TrackPoint]) -> Vec<f64> {
        let mut cumulative = Vec::with_capacity(points.len());
        if points.is_empty() {
            return cumulative;
        }
        cumulative.push(0.0);
        let mut total = 0.0;
        for (a, b) in points.iter().tuple_windows() {
            total += self.distance(a, b);
            cumulative.push(total);
        }
        cumulative
    }

    pub fn total_length(self, points: &[TrackPoint]) -> f64 {
        points
            .iter()
            .tuple_windows()
            .map(|(a, b)| self.distance(a, b))
            .sum()
    }
}
