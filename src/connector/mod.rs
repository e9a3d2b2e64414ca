//! # Connector Layer
//!
//! Concrete providers and the wiring that exposes them:
//! - Provider adapters (MapQuest, Google) built on an HTTP transport
//! - The composition container and command router used by the CLI

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
