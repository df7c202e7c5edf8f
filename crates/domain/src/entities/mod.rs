//! Domain entities

mod contact_message;
mod stop;
mod trip;

pub use contact_message::ContactMessage;
pub use stop::Stop;
pub use trip::{LOCAL_TIME_ZONE, Leg, LegEndpoint, TransitMode, Transportation, Trip};
