//! Validation and synchronization of the Smart City admin modules.
//!
//! Nothing in here performs I/O: the REST API, the confirmation dialog,
//! the notifications and the persistence of the session are
//! injected through the traits in [`gateways`] and [`session`].

pub mod draft;
pub mod gateways;
pub mod kinds;
pub mod markers;
pub mod session;
pub mod stats;
pub mod sync;
pub mod validate;

pub mod entities {
    pub use smartcity_entities::{
        assistant::*, event::*, id::*, session::*, station::*, stats::*, transport::*, user::*,
        zone::*,
    };
}
