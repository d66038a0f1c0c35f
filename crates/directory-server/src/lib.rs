//! # Directory Server Library
//!
//! Dependency injection wiring and application assembly for the user
//! directory server.

pub mod app;
pub mod di;
pub mod startup;

pub use app::Application;
