//! Caching infrastructure for the service layer.
//!
//! The cache is a disposable copy of durable records keyed by email. A
//! Redis implementation serves shared deployments and a moka one serves
//! single-node setups.

pub mod cache_keys;
mod moka_cache;
mod redis_cache;
mod user_cache;

pub use moka_cache::{MokaUserCache, MokaUserCacheParameters};
pub use redis_cache::{RedisUserCache, RedisUserCacheParameters, DEFAULT_TTL};
pub use user_cache::{CacheError, UserCache};
