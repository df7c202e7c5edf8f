//! Domain layer for Stockholm Direkt
//!
//! Contains the transit vocabulary (stops, trips, legs), the contact-form
//! message, value objects and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
