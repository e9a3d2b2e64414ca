//! Google Maps Geocoding API.

mod geocoder;
mod request;
mod response;

pub use geocoder::*;
pub use request::*;
pub use response::GoogleResponse;
