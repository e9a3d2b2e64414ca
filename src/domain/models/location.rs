use serde::{Deserialize, Serialize};

use crate::domain::GeocodeError;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

/// Unchecked wire shape; deserialization goes through [`Location::new`].
#[derive(Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = GeocodeError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.latitude, raw.longitude)
    }
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeocodeError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeocodeError::invalid_input(format!(
                "latitude {} is outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeocodeError::invalid_input(format!(
                "longitude {} is outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A rectangle described by two opposite corners.
///
/// Corners are kept in the order they were given so the provider token
/// reproduces the caller's input exactly; [`Bounds::south_west`] and
/// [`Bounds::north_east`] give the normalized corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    first: Location,
    second: Location,
}

impl Bounds {
    pub fn new(first: Location, second: Location) -> Self {
        Self { first, second }
    }

    /// Builds bounds from `[lat1, lng1, lat2, lng2]`.
    pub fn from_corners(corners: [f64; 4]) -> Result<Self, GeocodeError> {
        let [lat1, lng1, lat2, lng2] = corners;
        Ok(Self::new(Location::new(lat1, lng1)?, Location::new(lat2, lng2)?))
    }

    pub fn first(&self) -> Location {
        self.first
    }

    pub fn second(&self) -> Location {
        self.second
    }

    pub fn south_west(&self) -> Location {
        Location {
            latitude: self.first.latitude.min(self.second.latitude),
            longitude: self.first.longitude.min(self.second.longitude),
        }
    }

    pub fn north_east(&self) -> Location {
        Location {
            latitude: self.first.latitude.max(self.second.latitude),
            longitude: self.first.longitude.max(self.second.longitude),
        }
    }

    pub fn contains(&self, location: &Location) -> bool {
        let sw = self.south_west();
        let ne = self.north_east();
        (sw.latitude..=ne.latitude).contains(&location.latitude)
            && (sw.longitude..=ne.longitude).contains(&location.longitude)
    }

    /// Comma-joined corner values in construction order, e.g.
    /// `52.427,14.3584,52.2365,14.7018`.
    pub fn to_token(&self) -> String {
        format!(
            "{},{},{},{}",
            self.first.latitude, self.first.longitude, self.second.latitude, self.second.longitude
        )
    }
}

impl std::str::FromStr for Bounds {
    type Err = GeocodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|e| {
                    GeocodeError::invalid_input(format!("invalid bounding box value '{}': {}", part, e))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let corners: [f64; 4] = values.try_into().map_err(|_| {
            GeocodeError::invalid_input("bounding box needs exactly four values: lat1,lng1,lat2,lng2")
        })?;

        Self::from_corners(corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_rejects_out_of_range() {
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());
        assert!(Location::new(90.5, 0.0).is_err());
        assert!(Location::new(0.0, -180.1).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_deserialize_validates_ranges() {
        let err = serde_json::from_str::<Location>(r#"{"latitude": 999.0, "longitude": -500.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("latitude 999"));

        let location = Location::new(52.3471, 14.5506).unwrap();
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(serde_json::from_str::<Location>(&json).unwrap(), location);
    }

    #[test]
    fn test_deserialize_bounds_validates_corners() {
        let json = r#"{
            "first": {"latitude": 52.427, "longitude": 14.3584},
            "second": {"latitude": 52.2365, "longitude": 914.7018}
        }"#;
        assert!(serde_json::from_str::<Bounds>(json).is_err());

        let bounds = Bounds::from_corners([52.4270, 14.3584, 52.2365, 14.7018]).unwrap();
        let json = serde_json::to_string(&bounds).unwrap();
        assert_eq!(serde_json::from_str::<Bounds>(&json).unwrap(), bounds);
    }

    #[test]
    fn test_bounds_token_keeps_input_order() {
        let bounds = Bounds::from_corners([52.4270, 14.3584, 52.2365, 14.7018]).unwrap();
        assert_eq!(bounds.to_token(), "52.427,14.3584,52.2365,14.7018");
    }

    #[test]
    fn test_bounds_contains_uses_normalized_corners() {
        let bounds = Bounds::from_corners([52.4270, 14.3584, 52.2365, 14.7018]).unwrap();

        let frankfurt_oder = Location::new(52.3471, 14.5506).unwrap();
        let frankfurt_main = Location::new(50.1109, 8.6821).unwrap();

        assert!(bounds.contains(&frankfurt_oder));
        assert!(!bounds.contains(&frankfurt_main));
        assert_eq!(bounds.south_west().latitude(), 52.2365);
        assert_eq!(bounds.north_east().longitude(), 14.7018);
    }

    #[test]
    fn test_bounds_from_str() {
        let bounds: Bounds = "52.4270, 14.3584,52.2365,14.7018".parse().unwrap();
        assert_eq!(bounds.to_token(), "52.427,14.3584,52.2365,14.7018");

        assert!("1,2,3".parse::<Bounds>().is_err());
        assert!("a,b,c,d".parse::<Bounds>().is_err());
    }
}
