//! # Application Layer
//!
//! Capability contracts, the transport port, and the orchestration built on
//! top of them (batch synthesis, blocking adapter, cancellable tasks).

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
