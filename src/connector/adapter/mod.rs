pub(crate) mod decode;
pub mod google;
pub mod mapquest;
mod mock_transport;
mod reqwest_transport;

pub use google::*;
pub use mapquest::*;
pub use mock_transport::*;
pub use reqwest_transport::*;
