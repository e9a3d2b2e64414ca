//! # Domain Layer
//!
//! Normalized geocoding model and the error taxonomy.
//! This layer is independent of providers, transports and the CLI.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
