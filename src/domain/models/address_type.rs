use serde::{Deserialize, Serialize};

/// How closely a result's coordinate matches the real-world feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Rooftop,
    Interpolated,
    GeometricCenter,
    Approximate,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Rooftop => "rooftop",
            Precision::Interpolated => "interpolated",
            Precision::GeometricCenter => "geometric_center",
            Precision::Approximate => "approximate",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feature types reported by the Google geocoding API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoogleAddressType {
    StreetAddress,
    Route,
    Intersection,
    Political,
    Country,
    AdministrativeAreaLevel1,
    AdministrativeAreaLevel2,
    AdministrativeAreaLevel3,
    AdministrativeAreaLevel4,
    AdministrativeAreaLevel5,
    ColloquialArea,
    Locality,
    Sublocality,
    SublocalityLevel1,
    SublocalityLevel2,
    Neighborhood,
    Premise,
    Subpremise,
    PostalCode,
    PostalCodeSuffix,
    PostalTown,
    NaturalFeature,
    Airport,
    Park,
    PointOfInterest,
    PostBox,
    StreetNumber,
    Floor,
    Room,
    Establishment,
    PlusCode,
    /// A type code this crate does not know; the original code is kept.
    Unknown(String),
}

impl GoogleAddressType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "street_address" => Self::StreetAddress,
            "route" => Self::Route,
            "intersection" => Self::Intersection,
            "political" => Self::Political,
            "country" => Self::Country,
            "administrative_area_level_1" => Self::AdministrativeAreaLevel1,
            "administrative_area_level_2" => Self::AdministrativeAreaLevel2,
            "administrative_area_level_3" => Self::AdministrativeAreaLevel3,
            "administrative_area_level_4" => Self::AdministrativeAreaLevel4,
            "administrative_area_level_5" => Self::AdministrativeAreaLevel5,
            "colloquial_area" => Self::ColloquialArea,
            "locality" => Self::Locality,
            "sublocality" => Self::Sublocality,
            "sublocality_level_1" => Self::SublocalityLevel1,
            "sublocality_level_2" => Self::SublocalityLevel2,
            "neighborhood" => Self::Neighborhood,
            "premise" => Self::Premise,
            "subpremise" => Self::Subpremise,
            "postal_code" => Self::PostalCode,
            "postal_code_suffix" => Self::PostalCodeSuffix,
            "postal_town" => Self::PostalTown,
            "natural_feature" => Self::NaturalFeature,
            "airport" => Self::Airport,
            "park" => Self::Park,
            "point_of_interest" => Self::PointOfInterest,
            "post_box" => Self::PostBox,
            "street_number" => Self::StreetNumber,
            "floor" => Self::Floor,
            "room" => Self::Room,
            "establishment" => Self::Establishment,
            "plus_code" => Self::PlusCode,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::StreetAddress => "street_address",
            Self::Route => "route",
            Self::Intersection => "intersection",
            Self::Political => "political",
            Self::Country => "country",
            Self::AdministrativeAreaLevel1 => "administrative_area_level_1",
            Self::AdministrativeAreaLevel2 => "administrative_area_level_2",
            Self::AdministrativeAreaLevel3 => "administrative_area_level_3",
            Self::AdministrativeAreaLevel4 => "administrative_area_level_4",
            Self::AdministrativeAreaLevel5 => "administrative_area_level_5",
            Self::ColloquialArea => "colloquial_area",
            Self::Locality => "locality",
            Self::Sublocality => "sublocality",
            Self::SublocalityLevel1 => "sublocality_level_1",
            Self::SublocalityLevel2 => "sublocality_level_2",
            Self::Neighborhood => "neighborhood",
            Self::Premise => "premise",
            Self::Subpremise => "subpremise",
            Self::PostalCode => "postal_code",
            Self::PostalCodeSuffix => "postal_code_suffix",
            Self::PostalTown => "postal_town",
            Self::NaturalFeature => "natural_feature",
            Self::Airport => "airport",
            Self::Park => "park",
            Self::PointOfInterest => "point_of_interest",
            Self::PostBox => "post_box",
            Self::StreetNumber => "street_number",
            Self::Floor => "floor",
            Self::Room => "room",
            Self::Establishment => "establishment",
            Self::PlusCode => "plus_code",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

/// MapQuest `geocodeQuality` granularity levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapQuestQuality {
    Point,
    Address,
    Intersection,
    Street,
    Neighborhood,
    ZipExtended,
    Zip,
    City,
    County,
    State,
    Country,
    Unknown(String),
}

impl MapQuestQuality {
    pub fn from_code(code: &str) -> Self {
        match code {
            "POINT" => Self::Point,
            "ADDRESS" => Self::Address,
            "INTERSECTION" => Self::Intersection,
            "STREET" => Self::Street,
            "NEIGHBORHOOD" => Self::Neighborhood,
            "ZIP_EXTENDED" => Self::ZipExtended,
            "ZIP" => Self::Zip,
            "CITY" => Self::City,
            "COUNTY" => Self::County,
            "STATE" => Self::State,
            "COUNTRY" => Self::Country,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Point => "POINT",
            Self::Address => "ADDRESS",
            Self::Intersection => "INTERSECTION",
            Self::Street => "STREET",
            Self::Neighborhood => "NEIGHBORHOOD",
            Self::ZipExtended => "ZIP_EXTENDED",
            Self::Zip => "ZIP",
            Self::City => "CITY",
            Self::County => "COUNTY",
            Self::State => "STATE",
            Self::Country => "COUNTRY",
            Self::Unknown(code) => code,
        }
    }

    pub fn precision(&self) -> Option<Precision> {
        match self {
            Self::Point | Self::Address => Some(Precision::Rooftop),
            Self::Intersection | Self::Street => Some(Precision::Interpolated),
            Self::Neighborhood | Self::ZipExtended | Self::Zip | Self::City | Self::County => {
                Some(Precision::GeometricCenter)
            }
            Self::State | Self::Country => Some(Precision::Approximate),
            Self::Unknown(_) => None,
        }
    }
}

/// The provider-specific type tag attached to every [`super::Address`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "provider", content = "type", rename_all = "lowercase")]
pub enum AddressType {
    Google(GoogleAddressType),
    MapQuest(MapQuestQuality),
}

impl AddressType {
    pub fn provider(&self) -> &'static str {
        match self {
            AddressType::Google(_) => "google",
            AddressType::MapQuest(_) => "mapquest",
        }
    }

    pub fn code(&self) -> &str {
        match self {
            AddressType::Google(t) => t.code(),
            AddressType::MapQuest(q) => q.code(),
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider(), self.code())
    }
}
