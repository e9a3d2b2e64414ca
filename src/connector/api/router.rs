use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{BatchController, GeocodeController, ReverseController};

pub struct Router<'a> {
    geocode_controller: GeocodeController<'a>,
    reverse_controller: ReverseController<'a>,
    batch_controller: BatchController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            geocode_controller: GeocodeController::new(container),
            reverse_controller: ReverseController::new(container),
            batch_controller: BatchController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Geocode { address, format } => {
                self.geocode_controller.geocode(address, format).await
            }
            Commands::Reverse { lat, lng, format } => {
                self.reverse_controller.reverse(lat, lng, format).await
            }
            Commands::Batch { addresses, format } => {
                self.batch_controller.batch(addresses, format).await
            }
        }
    }
}
