use std::{collections::BTreeMap, fmt};

use lazy_static::lazy_static;
use regex::Regex;

pub use fast_chemail::is_valid_email;

use crate::{draft::*, entities::*};

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_EVENT_DESCRIPTION_LEN: usize = 5000;
pub const MAX_ZONE_DESCRIPTION_LEN: usize = 2000;

lazy_static! {
    static ref REGISTRATION_REGEX: Regex = Regex::new(r"^[A-Za-z0-9-]{2,}$").unwrap();
    // Digit grouping only: the calendar validity is not checked.
    static ref DATE_REGEX: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
}

/// Checks a draft and turns it into the payload sent to the backend.
pub trait Validate {
    type Valid;

    /// Runs all rules and collects every violation.
    fn validate(&self) -> Result<Self::Valid, ValidationErrors>;

    fn report(&self) -> Report {
        let errors = self.validate().err().unwrap_or_default();
        Report {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub valid: bool,
    pub errors: ValidationErrors,
}

/// Human-readable error messages keyed by the wire name of the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn add(&mut self, field: &'static str, message: String) {
        self.0.insert(field, message);
    }

    fn finish<T>(self, valid: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(valid())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn is_too_short(name: &str) -> bool {
    name.trim().chars().count() < MIN_NAME_LEN
}

fn exceeds(text: &str, max_len: usize) -> bool {
    text.chars().count() > max_len
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn finite_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_integer(n: f64) -> bool {
    n.fract() == 0.0
}

// An absent (empty) optional number is fine,
// a present but invalid one is not.
fn optional_number(raw: &str, admissible: impl Fn(f64) -> bool) -> Result<Option<f64>, ()> {
    if raw.is_empty() {
        return Ok(None);
    }
    match finite_number(raw) {
        Some(n) if admissible(n) => Ok(Some(n)),
        _ => Err(()),
    }
}

fn required_number(raw: &str, admissible: impl Fn(f64) -> bool) -> Option<f64> {
    finite_number(raw).filter(|n| admissible(*n))
}

// Float to int casts saturate: the bounds are checked before.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u32(n: f64) -> u32 {
    n as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u64(n: f64) -> u64 {
    n as u64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_severity(n: f64) -> Severity {
    n as Severity
}

#[allow(clippy::cast_precision_loss)]
fn fits_u64(n: f64) -> bool {
    n <= u64::MAX as f64
}

impl Validate for UserDraft {
    type Valid = UserPayload;

    fn validate(&self) -> Result<Self::Valid, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if is_too_short(&self.name) {
            errors.add(
                "nom",
                format!(
                    "The name \"{}\" is too short, enter at least {MIN_NAME_LEN} characters.",
                    self.name
                ),
            );
        }
        let age = optional_number(&self.age, |n| {
            n >= 0.0 && is_integer(n) && n <= f64::from(u32::MAX)
        })
        .unwrap_or_else(|()| {
            errors.add(
                "age",
                format!(
                    "The age \"{}\" is invalid, enter a positive integer.",
                    self.age
                ),
            );
            None
        });
        let email = non_empty(&self.email);
        if let Some(email) = &email {
            if !is_valid_email(email) {
                errors.add(
                    "email",
                    format!("The email address \"{email}\" is invalid."),
                );
            }
        }
        errors.finish(|| UserPayload {
            name: self.name.trim().to_owned(),
            age: age.map(to_u32),
            email,
            kind: self.kind.clone(),
            subscription_card: self.subscription_card,
        })
    }
}

impl Validate for TransportDraft {
    type Valid = TransportPayload;

    fn validate(&self) -> Result<Self::Valid, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if is_too_short(&self.name) {
            errors.add(
                "nom",
                format!(
                    "The name \"{}\" is too short, enter at least {MIN_NAME_LEN} characters.",
                    self.name
                ),
            );
        }
        let capacity = optional_number(&self.capacity, |n| {
            n > 0.0 && is_integer(n) && n <= f64::from(u32::MAX)
        })
        .unwrap_or_else(|()| {
            errors.add(
                "capacite",
                format!(
                    "The capacity \"{}\" is invalid, enter a positive integer (e.g. 50).",
                    self.capacity
                ),
            );
            None
        });
        let max_speed = optional_number(&self.max_speed, |n| n > 0.0).unwrap_or_else(|()| {
            errors.add(
                "vitesseMax",
                format!(
                    "The speed \"{}\" is invalid, enter a positive number (e.g. 90).",
                    self.max_speed
                ),
            );
            None
        });
        if !self.registration.is_empty() && !REGISTRATION_REGEX.is_match(&self.registration) {
            errors.add(
                "immatriculation",
                format!(
                    "The registration \"{}\" looks invalid, use letters, digits and '-' (e.g. BUS-101-TN).",
                    self.registration
                ),
            );
        }
        errors.finish(|| TransportPayload {
            name: self.name.trim().to_owned(),
            kind: self.kind.clone(),
            capacity: capacity.map(to_u32),
            registration: (!self.registration.is_empty()).then(|| self.registration.clone()),
            max_speed,
            electric: self.electric,
            image_url: non_empty(&self.image_url),
        })
    }
}

impl Validate for StationDraft {
    type Valid = StationPayload;

    fn validate(&self) -> Result<Self::Valid, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if is_too_short(&self.name) {
            errors.add(
                "nom",
                format!("The station name \"{}\" is required.", self.name),
            );
        }
        let latitude = required_number(&self.latitude, |n| (-90.0..=90.0).contains(&n));
        if latitude.is_none() {
            errors.add(
                "latitude",
                format!(
                    "Latitude \"{}\" is invalid, expected a value between -90 and 90.",
                    self.latitude
                ),
            );
        }
        let longitude = required_number(&self.longitude, |n| (-180.0..=180.0).contains(&n));
        if longitude.is_none() {
            errors.add(
                "longitude",
                format!(
                    "Longitude \"{}\" is invalid, expected a value between -180 and 180.",
                    self.longitude
                ),
            );
        }
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => errors.finish(|| StationPayload {
                name: self.name.trim().to_owned(),
                kind: self.kind.clone(),
                latitude,
                longitude,
            }),
            _ => Err(errors),
        }
    }
}

impl Validate for EventDraft {
    type Valid = EventPayload;

    fn validate(&self) -> Result<Self::Valid, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if is_too_short(&self.name) {
            errors.add(
                "nom",
                format!("The event name \"{}\" is required.", self.name),
            );
        }
        let severity = required_number(&self.severity, |n| {
            (f64::from(MIN_SEVERITY)..=f64::from(MAX_SEVERITY)).contains(&n) && is_integer(n)
        });
        if severity.is_none() {
            errors.add(
                "gravite",
                format!(
                    "Severity \"{}\" is invalid, choose a value between {MIN_SEVERITY} (low) and {MAX_SEVERITY} (high).",
                    self.severity
                ),
            );
        }
        if !self.date.is_empty() && !DATE_REGEX.is_match(&self.date) {
            errors.add(
                "date",
                format!(
                    "The date \"{}\" is invalid, expected format: YYYY-MM-DD",
                    self.date
                ),
            );
        }
        if exceeds(&self.description, MAX_EVENT_DESCRIPTION_LEN) {
            errors.add(
                "description",
                format!("Description too long (max {MAX_EVENT_DESCRIPTION_LEN} characters)"),
            );
        }
        match severity {
            Some(severity) => errors.finish(|| EventPayload {
                name: self.name.trim().to_owned(),
                kind: self.kind.clone(),
                description: non_empty(&self.description),
                severity: to_severity(severity),
                date: (!self.date.is_empty()).then(|| self.date.clone()),
                image_url: non_empty(&self.image_url),
            }),
            None => Err(errors),
        }
    }
}

impl Validate for ZoneDraft {
    type Valid = ZonePayload;

    fn validate(&self) -> Result<Self::Valid, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if is_too_short(&self.name) {
            errors.add(
                "nom",
                format!(
                    "The zone name \"{}\" is required and must contain at least {MIN_NAME_LEN} characters.",
                    self.name
                ),
            );
        }
        let area = optional_number(&self.area, |n| n >= 0.0).unwrap_or_else(|()| {
            errors.add(
                "superficie",
                format!(
                    "Area \"{}\" is invalid, enter a positive number (km²).",
                    self.area
                ),
            );
            None
        });
        let population = optional_number(&self.population, |n| {
            n >= 0.0 && is_integer(n) && fits_u64(n)
        })
        .unwrap_or_else(|()| {
            errors.add(
                "population",
                format!(
                    "Population \"{}\" is invalid, enter a positive integer.",
                    self.population
                ),
            );
            None
        });
        if exceeds(&self.description, MAX_ZONE_DESCRIPTION_LEN) {
            errors.add(
                "description",
                format!("Description too long (max {MAX_ZONE_DESCRIPTION_LEN} characters)"),
            );
        }
        errors.finish(|| ZonePayload {
            name: self.name.trim().to_owned(),
            kind: self.kind.clone(),
            area,
            population: population.map(to_u64),
            description: non_empty(&self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(name: &str) -> TransportDraft {
        TransportDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    fn station(name: &str, lat: &str, lng: &str) -> StationDraft {
        StationDraft {
            name: name.into(),
            latitude: lat.into(),
            longitude: lng.into(),
            ..Default::default()
        }
    }

    fn event(name: &str, severity: &str) -> EventDraft {
        EventDraft {
            name: name.into(),
            severity: severity.into(),
            ..Default::default()
        }
    }

    #[test]
    fn short_names_are_rejected_for_every_kind() {
        for name in ["", " ", "A", " B "] {
            let user = UserDraft {
                name: name.into(),
                ..Default::default()
            };
            assert!(user.validate().unwrap_err().contains("nom"));
            assert!(transport(name).validate().unwrap_err().contains("nom"));
            assert!(station(name, "1", "1").validate().unwrap_err().contains("nom"));
            assert!(event(name, "3").validate().unwrap_err().contains("nom"));
            let zone = ZoneDraft {
                name: name.into(),
                ..Default::default()
            };
            assert!(zone.validate().unwrap_err().contains("nom"));
        }
    }

    #[test]
    fn name_error_echoes_the_value() {
        let errors = transport("X").validate().unwrap_err();
        assert!(errors.get("nom").unwrap().contains("\"X\""));
    }

    #[test]
    fn names_are_trimmed_in_payload() {
        let payload = transport("  Bus 12 ").validate().unwrap();
        assert_eq!(payload.name, "Bus 12");
        // multi byte characters count as one
        assert!(transport("Ét").validate().is_ok());
    }

    #[test]
    fn station_coordinates_are_mandatory_and_range_checked() {
        let payload = station("A station", "36.8065", "10.1815").validate().unwrap();
        assert_eq!(payload.latitude, 36.8065);
        assert_eq!(payload.longitude, 10.1815);

        let errors = station("A station", "95", "10").validate().unwrap_err();
        assert!(errors.contains("latitude"));
        assert!(!errors.contains("longitude"));

        let errors = station("A station", "", "").validate().unwrap_err();
        assert!(errors.contains("latitude"));
        assert!(errors.contains("longitude"));

        let errors = station("A station", "-90", "181").validate().unwrap_err();
        assert!(!errors.contains("latitude"));
        assert!(errors.contains("longitude"));

        for raw in ["abc", "NaN", "inf", "-infinity"] {
            let errors = station("A station", raw, "10").validate().unwrap_err();
            assert!(errors.contains("latitude"), "{raw}");
        }
        assert!(station("A station", "90", "-180").validate().is_ok());
    }

    #[test]
    fn event_severity_must_be_in_range() {
        assert!(event("Accident X", "6").validate().unwrap_err().contains("gravite"));
        assert!(event("Accident X", "0").validate().unwrap_err().contains("gravite"));
        assert!(event("Accident X", "").validate().unwrap_err().contains("gravite"));
        assert!(event("Accident X", "2.5").validate().unwrap_err().contains("gravite"));
        let payload = event("Accident X", "3").validate().unwrap();
        assert_eq!(payload.severity, 3);
        assert!(payload.date.is_none());
        assert!(payload.description.is_none());
    }

    #[test]
    fn event_date_checks_digit_grouping_only() {
        let mut draft = event("Accident X", "3");
        draft.date = "2024-05-01".into();
        assert!(draft.validate().is_ok());
        draft.date = "2024-13-40".into();
        assert!(draft.validate().is_ok());
        draft.date = "01/05/2024".into();
        assert!(draft.validate().unwrap_err().contains("date"));
        draft.date = "2024-5-1".into();
        assert!(draft.validate().unwrap_err().contains("date"));
        // no unicode digits
        draft.date = "٢٠٢٤-05-01".into();
        assert!(draft.validate().unwrap_err().contains("date"));
    }

    #[test]
    fn description_length_caps() {
        let mut draft = event("Accident X", "3");
        draft.description = "x".repeat(MAX_EVENT_DESCRIPTION_LEN);
        assert!(draft.validate().is_ok());
        draft.description.push('x');
        assert!(draft.validate().unwrap_err().contains("description"));

        let mut zone = ZoneDraft {
            name: "Lac 2".into(),
            ..Default::default()
        };
        zone.description = "é".repeat(MAX_ZONE_DESCRIPTION_LEN);
        assert!(zone.validate().is_ok());
        zone.description.push('é');
        assert!(zone.validate().unwrap_err().contains("description"));
    }

    #[test]
    fn transport_capacity_must_be_a_positive_integer_when_present() {
        assert!(transport("Bus 12").validate().unwrap().capacity.is_none());
        for raw in ["abc", "2.5", "0", "-3", " "] {
            let mut draft = transport("Bus 12");
            draft.capacity = raw.into();
            let errors = draft.validate().unwrap_err();
            assert!(errors.contains("capacite"), "{raw}");
            assert_eq!(errors.len(), 1);
        }
        let mut draft = transport("Bus 12");
        draft.capacity = "50".into();
        assert_eq!(draft.validate().unwrap().capacity, Some(50));
    }

    #[test]
    fn transport_speed_and_registration() {
        let mut draft = transport("Bus 12");
        draft.max_speed = "0".into();
        draft.registration = "BUS 101".into();
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("vitesseMax"));
        assert!(errors.contains("immatriculation"));

        draft.max_speed = "90.5".into();
        draft.registration = "bus-101-tn".into();
        let payload = draft.validate().unwrap();
        assert_eq!(payload.max_speed, Some(90.5));
        assert_eq!(payload.registration.as_deref(), Some("bus-101-tn"));

        draft.registration = "B".into();
        assert!(draft.validate().unwrap_err().contains("immatriculation"));
    }

    #[test]
    fn collect_all_violations() {
        let draft = TransportDraft {
            name: "X".into(),
            kind: TransportType::Bus,
            capacity: "2.5".into(),
            registration: "#".into(),
            max_speed: "-1".into(),
            electric: false,
            image_url: String::new(),
        };
        let report = draft.report();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 4);
        let fields: Vec<_> = report.errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, ["capacite", "immatriculation", "nom", "vitesseMax"]);
    }

    #[test]
    fn zone_numbers() {
        let mut zone = ZoneDraft {
            name: "Lac 2".into(),
            ..Default::default()
        };
        zone.area = "0".into();
        zone.population = "0".into();
        let payload = zone.validate().unwrap();
        assert_eq!(payload.area, Some(0.0));
        assert_eq!(payload.population, Some(0));

        zone.area = "-1".into();
        zone.population = "10.5".into();
        let errors = zone.validate().unwrap_err();
        assert!(errors.contains("superficie"));
        assert!(errors.contains("population"));
    }

    #[test]
    fn user_age_and_email() {
        let mut user = UserDraft {
            name: "Yassine".into(),
            ..Default::default()
        };
        let report = user.report();
        assert!(report.valid);
        assert!(report.errors.is_empty());

        user.age = "-1".into();
        user.email = "foo@bar".into();
        let errors = user.validate().unwrap_err();
        assert!(errors.contains("age"));
        assert!(errors.contains("email"));

        user.age = "27".into();
        user.email = "yassine@example.tn".into();
        let payload = user.validate().unwrap();
        assert_eq!(payload.age, Some(27));
        assert_eq!(payload.email.as_deref(), Some("yassine@example.tn"));
    }

    #[test]
    fn validation_does_not_touch_the_draft() {
        let draft = station(" A ", "95", "x");
        let copy = draft.clone();
        let _ = draft.validate();
        assert_eq!(draft, copy);
    }

    #[test]
    fn display_errors() {
        let errors = station("A station", "95", "10").validate().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "latitude: Latitude \"95\" is invalid, expected a value between -90 and 90."
        );
    }
}
