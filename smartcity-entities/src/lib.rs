#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # smartcity-entities
//!
//! Reusable, agnostic domain entities for the Smart City admin.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod assistant;
pub mod event;
pub mod id;
pub mod session;
pub mod station;
pub mod stats;
pub mod transport;
pub mod user;
pub mod zone;
