//! MySQL store implementations.

mod user_store;

pub use user_store::*;
