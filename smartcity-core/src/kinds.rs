//! One configuration per managed resource type.

use crate::{
    draft::*,
    entities::*,
    validate::Validate,
};

/// Everything the synchronizer needs to know about an entity kind.
pub trait EntityKind {
    /// Path segment of the REST resource, e.g. `transports`.
    const RESOURCE: &'static str;
    /// Singular name used in messages.
    const LABEL: &'static str;

    type Record: Clone;
    type Payload: Clone;
    type Draft: Draft + Validate<Valid = Self::Payload>;

    fn id(record: &Self::Record) -> &Id;
    fn name(record: &Self::Record) -> &str;
    /// A pre-filled draft for editing an existing record.
    fn draft_from(record: &Self::Record) -> Self::Draft;
}

#[derive(Debug, Clone, Copy)]
pub struct Users;

#[derive(Debug, Clone, Copy)]
pub struct Transports;

#[derive(Debug, Clone, Copy)]
pub struct Stations;

#[derive(Debug, Clone, Copy)]
pub struct Events;

#[derive(Debug, Clone, Copy)]
pub struct Zones;

macro_rules! entity_kind {
    ($kind:ty, $resource:literal, $label:literal, $record:ty, $payload:ty, $draft:ty) => {
        impl EntityKind for $kind {
            const RESOURCE: &'static str = $resource;
            const LABEL: &'static str = $label;

            type Record = $record;
            type Payload = $payload;
            type Draft = $draft;

            fn id(record: &Self::Record) -> &Id {
                &record.id
            }
            fn name(record: &Self::Record) -> &str {
                &record.name
            }
            fn draft_from(record: &Self::Record) -> Self::Draft {
                <$draft>::from(record)
            }
        }
    };
}

entity_kind!(Users, "users", "user", User, UserPayload, UserDraft);
entity_kind!(Transports, "transports", "transport", Transport, TransportPayload, TransportDraft);
entity_kind!(Stations, "stations", "station", Station, StationPayload, StationDraft);
entity_kind!(Events, "events", "event", Event, EventPayload, EventDraft);
entity_kind!(Zones, "zones", "zone", Zone, ZonePayload, ZoneDraft);
