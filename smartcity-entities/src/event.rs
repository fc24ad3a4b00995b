use std::fmt;

use strum::EnumString;

use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum EventType {
    #[default]
    Accident,
    #[strum(serialize = "Embouteillage", serialize = "TrafficJam")]
    TrafficJam,
    #[strum(serialize = "Travaux", serialize = "Construction")]
    Construction,
    #[strum(serialize = "Manifestation", serialize = "Demonstration")]
    Demonstration,
    #[strum(default)]
    Other(String),
}

impl EventType {
    pub const ALL: [Self; 4] = [
        Self::Accident,
        Self::TrafficJam,
        Self::Construction,
        Self::Demonstration,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Accident => "Accident",
            Self::TrafficJam => "Embouteillage",
            Self::Construction => "Travaux",
            Self::Demonstration => "Manifestation",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a traffic event, from 1 (low) to 5 (high).
pub type Severity = u8;

pub const MIN_SEVERITY: Severity = 1;
pub const MAX_SEVERITY: Severity = 5;
pub const DEFAULT_SEVERITY: Severity = 3;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id          : Id,
    pub name        : String,
    pub kind        : EventType,
    pub description : Option<String>,
    pub severity    : Option<Severity>,
    /// Calendar date as `YYYY-MM-DD`.
    pub date        : Option<String>,
    pub image_url   : Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPayload {
    pub name        : String,
    pub kind        : EventType,
    pub description : Option<String>,
    pub severity    : Severity,
    pub date        : Option<String>,
    pub image_url   : Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_from_str() {
        assert_eq!("embouteillage".parse::<EventType>().unwrap(), EventType::TrafficJam);
        assert_eq!("Construction".parse::<EventType>().unwrap(), EventType::Construction);
        assert_eq!(EventType::Demonstration.to_string(), "Manifestation");
        assert_eq!(
            "Inondation".parse::<EventType>().unwrap(),
            EventType::Other("Inondation".into())
        );
    }
}
