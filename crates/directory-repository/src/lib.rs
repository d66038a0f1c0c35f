//! # Directory Repository
//!
//! Durable storage for user records:
//!
//! ```text
//! UserService
//!   ↓  Arc<dyn UserStore>
//! MySqlUserStore | InMemoryUserStore
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! Every store call takes a [`RequestContext`](directory_core::RequestContext)
//! and stops waiting on the backend as soon as the context ends.

pub mod error;
pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use error::*;
pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
