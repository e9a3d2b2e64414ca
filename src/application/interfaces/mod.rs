mod geocoder;
mod http_transport;

pub use geocoder::*;
pub use http_transport::*;
