mod address;
mod address_type;
mod api_key;
mod geocode_result;
mod location;
mod request_options;

pub use address::*;
pub use address_type::*;
pub use api_key::*;
pub use geocode_result::*;
pub use location::*;
pub use request_options::*;
