mod blocking_geocoder;
mod geocode;
mod geocode_task;
mod synthesized_batch;

pub use blocking_geocoder::*;
pub use geocode::*;
pub use geocode_task::*;
pub use synthesized_batch::*;
