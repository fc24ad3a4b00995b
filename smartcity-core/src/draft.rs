//! Drafts are the in-progress, unpersisted form state of an entity.
//!
//! Numeric fields hold the raw text as typed by the user,
//! so that a missing value (empty) can be told apart from
//! an invalid one.

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field '{0}'")]
    Unknown(String),
    #[error("Invalid flag '{value}' for field '{field}'")]
    Flag { field: &'static str, value: String },
}

/// Generic access to the fields of a draft by their wire names.
pub trait Draft: Clone + Default {
    /// The wire names of all editable fields.
    const FIELDS: &'static [&'static str];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError>;
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, FieldError> {
    match &*value.trim().to_lowercase() {
        "true" | "yes" | "oui" | "1" | "on" => Ok(true),
        "false" | "no" | "non" | "0" | "off" | "" => Ok(false),
        _ => Err(FieldError::Flag {
            field,
            value: value.to_owned(),
        }),
    }
}

fn parse_kind<T>(value: &str) -> T
where
    T: std::str::FromStr + Default,
{
    value.trim().parse().unwrap_or_default()
}

fn number_text<T: ToString>(n: Option<T>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name              : String,
    pub age               : String,
    pub email             : String,
    pub kind              : UserType,
    pub subscription_card : bool,
}

impl Draft for UserDraft {
    const FIELDS: &'static [&'static str] = &["nom", "age", "email", "type", "carteAbonnement"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "nom" => self.name = value.to_owned(),
            "age" => self.age = value.to_owned(),
            "email" => self.email = value.to_owned(),
            "type" => self.kind = parse_kind(value),
            "carteAbonnement" => self.subscription_card = parse_flag("carteAbonnement", value)?,
            _ => return Err(FieldError::Unknown(field.to_owned())),
        }
        Ok(())
    }
}

impl From<&User> for UserDraft {
    fn from(from: &User) -> Self {
        Self {
            name: from.name.clone(),
            age: number_text(from.age),
            email: from.email.clone().unwrap_or_default(),
            kind: from.kind.clone(),
            subscription_card: from.subscription_card,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportDraft {
    pub name         : String,
    pub kind         : TransportType,
    pub capacity     : String,
    pub registration : String,
    pub max_speed    : String,
    pub electric     : bool,
    pub image_url    : String,
}

impl Draft for TransportDraft {
    const FIELDS: &'static [&'static str] = &[
        "nom",
        "type",
        "capacite",
        "immatriculation",
        "vitesseMax",
        "electrique",
        "imageUrl",
    ];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "nom" => self.name = value.to_owned(),
            "type" => self.kind = parse_kind(value),
            "capacite" => self.capacity = value.to_owned(),
            "immatriculation" => self.registration = value.to_owned(),
            "vitesseMax" => self.max_speed = value.to_owned(),
            "electrique" => self.electric = parse_flag("electrique", value)?,
            "imageUrl" => self.image_url = value.to_owned(),
            _ => return Err(FieldError::Unknown(field.to_owned())),
        }
        Ok(())
    }
}

impl From<&Transport> for TransportDraft {
    fn from(from: &Transport) -> Self {
        Self {
            name: from.name.clone(),
            kind: from.kind.clone(),
            capacity: number_text(from.capacity),
            registration: from.registration.clone().unwrap_or_default(),
            max_speed: number_text(from.max_speed),
            electric: from.electric,
            image_url: from.image_url.clone().unwrap_or_default(),
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDraft {
    pub name      : String,
    pub kind      : StationType,
    pub latitude  : String,
    pub longitude : String,
}

impl StationDraft {
    /// A new station at a position picked on the map.
    ///
    /// The coordinates are rounded to six decimal places (~10 cm).
    pub fn at(lat: f64, lng: f64) -> Self {
        let round = |deg: f64| (deg * 1e6).round() / 1e6;
        Self {
            latitude: round(lat).to_string(),
            longitude: round(lng).to_string(),
            ..Default::default()
        }
    }
}

impl Draft for StationDraft {
    const FIELDS: &'static [&'static str] = &["nom", "type", "latitude", "longitude"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "nom" => self.name = value.to_owned(),
            "type" => self.kind = parse_kind(value),
            "latitude" => self.latitude = value.to_owned(),
            "longitude" => self.longitude = value.to_owned(),
            _ => return Err(FieldError::Unknown(field.to_owned())),
        }
        Ok(())
    }
}

impl From<&Station> for StationDraft {
    fn from(from: &Station) -> Self {
        Self {
            name: from.name.clone(),
            kind: from.kind.clone(),
            latitude: number_text(from.latitude),
            longitude: number_text(from.longitude),
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name        : String,
    pub kind        : EventType,
    pub description : String,
    pub severity    : String,
    pub date        : String,
    pub image_url   : String,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: EventType::default(),
            description: String::new(),
            severity: DEFAULT_SEVERITY.to_string(),
            date: String::new(),
            image_url: String::new(),
        }
    }
}

impl EventDraft {
    /// A new event that happens at the given `YYYY-MM-DD` date.
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }
}

impl Draft for EventDraft {
    const FIELDS: &'static [&'static str] =
        &["nom", "type", "description", "gravite", "date", "imageUrl"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "nom" => self.name = value.to_owned(),
            "type" => self.kind = parse_kind(value),
            "description" => self.description = value.to_owned(),
            "gravite" => self.severity = value.to_owned(),
            "date" => self.date = value.to_owned(),
            "imageUrl" => self.image_url = value.to_owned(),
            _ => return Err(FieldError::Unknown(field.to_owned())),
        }
        Ok(())
    }
}

impl From<&Event> for EventDraft {
    fn from(from: &Event) -> Self {
        Self {
            name: from.name.clone(),
            kind: from.kind.clone(),
            description: from.description.clone().unwrap_or_default(),
            // An event without a severity has to be rated by the user.
            severity: number_text(from.severity),
            date: from.date.clone().unwrap_or_default(),
            image_url: from.image_url.clone().unwrap_or_default(),
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneDraft {
    pub name        : String,
    pub kind        : ZoneType,
    pub area        : String,
    pub population  : String,
    pub description : String,
}

impl Draft for ZoneDraft {
    const FIELDS: &'static [&'static str] =
        &["nom", "type", "superficie", "population", "description"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "nom" => self.name = value.to_owned(),
            "type" => self.kind = parse_kind(value),
            "superficie" => self.area = value.to_owned(),
            "population" => self.population = value.to_owned(),
            "description" => self.description = value.to_owned(),
            _ => return Err(FieldError::Unknown(field.to_owned())),
        }
        Ok(())
    }
}

impl From<&Zone> for ZoneDraft {
    fn from(from: &Zone) -> Self {
        Self {
            name: from.name.clone(),
            kind: from.kind.clone(),
            area: number_text(from.area),
            population: number_text(from.population),
            description: from.description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Validate;

    #[test]
    fn set_fields_by_wire_name() {
        let mut draft = TransportDraft::default();
        draft.set("nom", "Bus 12").unwrap();
        draft.set("capacite", "50").unwrap();
        draft.set("type", "Trottinette").unwrap();
        draft.set("electrique", "yes").unwrap();
        assert_eq!(draft.name, "Bus 12");
        assert_eq!(draft.capacity, "50");
        assert_eq!(draft.kind, TransportType::Scooter);
        assert!(draft.electric);
        assert_eq!(
            draft.set("color", "red"),
            Err(FieldError::Unknown("color".into()))
        );
        assert!(matches!(
            draft.set("electrique", "maybe"),
            Err(FieldError::Flag { .. })
        ));
    }

    #[test]
    fn every_listed_field_can_be_set() {
        fn check<D: Draft>() {
            let mut draft = D::default();
            for field in D::FIELDS {
                assert!(draft.set(field, "1").is_ok(), "{field}");
            }
        }
        check::<UserDraft>();
        check::<TransportDraft>();
        check::<StationDraft>();
        check::<EventDraft>();
        check::<ZoneDraft>();
    }

    #[test]
    fn empty_event_template_has_medium_severity() {
        let draft = EventDraft::default();
        assert_eq!(draft.severity, "3");
        assert!(draft.date.is_empty());
        assert_eq!(EventDraft::on("2024-06-01").date, "2024-06-01");
    }

    #[test]
    fn station_draft_at_picked_position() {
        let draft = StationDraft::at(36.806_512_345, 10.181_5);
        assert_eq!(draft.latitude, "36.806512");
        assert_eq!(draft.longitude, "10.1815");
        assert!(draft.name.is_empty());
    }

    #[test]
    fn edit_draft_from_record() {
        let event = Event {
            id: "Accident_1".into(),
            name: "Accident X".into(),
            kind: EventType::Accident,
            description: None,
            severity: None,
            date: Some("2024-03-02".into()),
            image_url: None,
        };
        let draft = EventDraft::from(&event);
        assert!(draft.severity.is_empty());
        assert_eq!(draft.date, "2024-03-02");
        assert!(draft.description.is_empty());
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("gravite"));

        let rated = Event {
            severity: Some(4),
            ..event.clone()
        };
        let payload = EventDraft::from(&rated).validate().unwrap();
        assert_eq!(payload.severity, 4);
        assert_eq!(payload.date.as_deref(), Some("2024-03-02"));

        let zone = Zone {
            id: "Z1".into(),
            name: "Lac".into(),
            kind: ZoneType::Commercial,
            area: Some(12.5),
            population: Some(30_000),
            description: None,
        };
        let draft = ZoneDraft::from(&zone);
        assert_eq!(draft.area, "12.5");
        assert_eq!(draft.population, "30000");
    }
}
