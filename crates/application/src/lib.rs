//! Application layer - Use cases and orchestration
//!
//! Contains the stop search fallback chain, the trip lookup flow, debounced
//! autocomplete and the contact relay with its mail templates, plus the port
//! definitions that infrastructure adapters implement.

pub mod error;
pub mod ports;
pub mod services;
pub mod templates;

pub use error::{ApplicationError, NetworkOperation};
pub use ports::*;
pub use services::*;
pub use templates::{MailTemplates, TemplateError};
