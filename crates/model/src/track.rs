use serde::{Deserialize, Serialize};

/// One position report.
///
/// `record` holds every field of the original row, in header order, so that
/// filtering never touches attributes it does not understand (timestamp,
/// vessel identifier, course over ground, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub record: Vec<String>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            record: Vec::new(),
        }
    }

    pub fn with_record(latitude: f64, longitude: f64, record: Vec<String>) -> Self {
        Self {
            latitude,
            longitude,
            record,
        }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.record.get(index).map(String::as_str)
    }
}

/// Ordered sequence of position reports of one vessel. The order is the order
/// of the input file, it is assumed (not checked) to be chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub headers: Vec<String>,
    pub points: Vec<TrackPoint>,
}

impl Trajectory {
    pub fn new(headers: Vec<String>, points: Vec<TrackPoint>) -> Self {
        Self { headers, points }
    }

    pub fn from_points(points: Vec<TrackPoint>) -> Self {
        Self {
            headers: Vec::new(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Value of column `name` in the first point.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        let index = self.column_index(name)?;
        self.points.first()?.field(index)
    }

    pub fn first(&self) -> Option<&TrackPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrackPoint> {
        self.points.last()
    }

    /// Splits into `[0, index)` and `[index, len)`, both keeping the headers.
    pub fn split_at(self, index: usize) -> (Trajectory, Trajectory) {
        let Trajectory {
            headers,
            mut points,
        } = self;
        let tail = points.split_off(index.min(points.len()));
        (
            Trajectory::new(headers.clone(), points),
            Trajectory::new(headers, tail),
        )
    }

    /// Appends the points of `other`. The headers of `self` are kept.
    pub fn concat(mut self, other: Trajectory) -> Trajectory {
        self.points.extend(other.points);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trajectory(n: usize) -> Trajectory {
        let points = (0..n)
            .map(|i| {
                TrackPoint::with_record(
                    i as f64,
                    0.0,
                    vec![i.to_string(), format!("{i}.0"), "0.0".to_owned()],
                )
            })
            .collect();
        Trajectory::new(
            vec!["id".to_owned(), "Latitude".to_owned(), "Longitude".to_owned()],
            points,
        )
    }

    #[test]
    fn split_and_concat_restore_order() {
        let original = trajectory(5);
        let (head, tail) = original.clone().split_at(2);
        assert_eq!(head.len(), 2);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail.headers, original.headers);
        assert_eq!(head.concat(tail), original);
    }

    #[test]
    fn split_beyond_end_is_clamped() {
        let (head, tail) = trajectory(3).split_at(10);
        assert_eq!(head.len(), 3);
        assert!(tail.is_empty());
    }

    #[test]
    fn first_value_reads_named_column() {
        let t = trajectory(3);
        assert_eq!(t.column_index("Latitude"), Some(1));
        assert_eq!(t.first_value("id"), Some("0"));
        assert_eq!(t.first_value("MMSI"), None);
    }
}
