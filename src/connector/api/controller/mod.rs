pub mod batch_controller;
pub mod geocode_controller;
pub mod reverse_controller;

pub use batch_controller::BatchController;
pub use geocode_controller::GeocodeController;
pub use reverse_controller::ReverseController;
