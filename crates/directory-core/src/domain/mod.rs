//! Domain entities and value objects of the user directory.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
