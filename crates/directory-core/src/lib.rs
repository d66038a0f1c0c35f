//! # Directory Core
//!
//! Core types, traits, and error definitions for the user directory.
//! Holds the `User` record, its validation pipeline, the public error
//! taxonomy and the request context threaded through every store call.

pub mod context;
pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use context::*;
pub use domain::*;
pub use error::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
