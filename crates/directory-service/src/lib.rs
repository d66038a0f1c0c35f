//! # Directory Service
//!
//! User creation and lookup on top of a durable store, with a best-effort
//! cache in front of reads.

pub mod cache;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
