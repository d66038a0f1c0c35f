//! # Directory REST
//!
//! HTTP surface of the user directory: user creation and lookup plus
//! health, readiness and liveness endpoints.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
