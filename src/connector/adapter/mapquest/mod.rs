//! MapQuest Geocoding API v1.

mod geocoder;
mod request;
mod response;

pub use geocoder::*;
pub use request::*;
pub use response::MapQuestResponse;
