//! Column names of the AIS CSV exports.
//!
//! Only latitude and longitude are needed to cut gaps, all other columns are
//! carried through untouched.

/// Latitude in decimal degrees, WGS-84.
pub const LATITUDE: &str = "Latitude";

/// Longitude in decimal degrees, WGS-84.
pub const LONGITUDE: &str = "Longitude";

/// Maritime Mobile Service Identity, the 9 digit vessel identifier.
pub const MMSI: &str = "MMSI";

/// Vessel category such as `Cargo`, `Tanker` or `Fishing`.
pub const SHIP_TYPE: &str = "Ship type";

/// Time of the report, `dd/mm/YYYY HH:MM:SS`.
pub const TIMESTAMP: &str = "# Timestamp";

/// Draught in meters.
pub const DRAUGHT: &str = "Draught";

/// Course over ground in degrees.
pub const COG: &str = "COG";

pub const NAVIGATIONAL_STATUS: &str = "Navigational status";
