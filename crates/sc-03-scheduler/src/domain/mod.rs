//! Domain layer for the Scheduler subsystem.

pub mod config;
pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use services::*;
pub use value_objects::*;
