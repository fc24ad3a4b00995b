use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct User {
    pub id                : String,
    #[serde(rename = "nom", default)]
    pub name              : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age               : Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email             : Option<String>,
    #[serde(rename = "type", default)]
    pub kind              : String,
    #[serde(rename = "carteAbonnement", default)]
    pub subscription_card : bool,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UserPayload {
    #[serde(rename = "nom")]
    pub name              : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age               : Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email             : Option<String>,
    #[serde(rename = "type")]
    pub kind              : String,
    #[serde(rename = "carteAbonnement")]
    pub subscription_card : bool,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Transport {
    pub id           : String,
    #[serde(rename = "nom", default)]
    pub name         : String,
    #[serde(rename = "type", default)]
    pub kind         : String,
    #[serde(rename = "capacite", default, skip_serializing_if = "Option::is_none")]
    pub capacity     : Option<u32>,
    #[serde(rename = "immatriculation", default, skip_serializing_if = "Option::is_none")]
    pub registration : Option<String>,
    #[serde(rename = "vitesseMax", default, skip_serializing_if = "Option::is_none")]
    pub max_speed    : Option<f64>,
    #[serde(rename = "electrique", default)]
    pub electric     : bool,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url    : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct TransportPayload {
    #[serde(rename = "nom")]
    pub name         : String,
    #[serde(rename = "type")]
    pub kind         : String,
    #[serde(rename = "capacite", skip_serializing_if = "Option::is_none")]
    pub capacity     : Option<u32>,
    #[serde(rename = "immatriculation", skip_serializing_if = "Option::is_none")]
    pub registration : Option<String>,
    #[serde(rename = "vitesseMax", skip_serializing_if = "Option::is_none")]
    pub max_speed    : Option<f64>,
    #[serde(rename = "electrique")]
    pub electric     : bool,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url    : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Station {
    pub id        : String,
    #[serde(rename = "nom", default)]
    pub name      : String,
    #[serde(rename = "type", default)]
    pub kind      : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude  : Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude : Option<f64>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct StationPayload {
    #[serde(rename = "nom")]
    pub name      : String,
    #[serde(rename = "type")]
    pub kind      : String,
    pub latitude  : f64,
    pub longitude : f64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Event {
    pub id          : String,
    #[serde(rename = "nom", default)]
    pub name        : String,
    #[serde(rename = "type", default)]
    pub kind        : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
    #[serde(rename = "gravite", default, skip_serializing_if = "Option::is_none")]
    pub severity    : Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date        : Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url   : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct EventPayload {
    #[serde(rename = "nom")]
    pub name        : String,
    #[serde(rename = "type")]
    pub kind        : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
    #[serde(rename = "gravite")]
    pub severity    : u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date        : Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url   : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Zone {
    pub id          : String,
    #[serde(rename = "nom", default)]
    pub name        : String,
    #[serde(rename = "type", default)]
    pub kind        : String,
    #[serde(rename = "superficie", default, skip_serializing_if = "Option::is_none")]
    pub area        : Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population  : Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ZonePayload {
    #[serde(rename = "nom")]
    pub name        : String,
    #[serde(rename = "type")]
    pub kind        : String,
    #[serde(rename = "superficie", skip_serializing_if = "Option::is_none")]
    pub area        : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population  : Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_users      : u64,
    pub total_transports : u64,
    pub total_stations   : u64,
    pub total_events     : u64,
    pub total_zones      : u64,
    pub total_trajets    : u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Session {
    pub user: SessionUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub user: Option<SessionUser>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    pub url: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NaturalQuery {
    pub question: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct NaturalQueryResponse {
    #[serde(default)]
    pub success         : bool,
    #[serde(default)]
    pub question        : String,
    pub generated_query : Option<String>,
    #[serde(default)]
    pub results         : Vec<BTreeMap<String, String>>,
    #[serde(default)]
    pub count           : usize,
    pub explanation     : Option<String>,
    pub error           : Option<String>,
}

/// The envelope of every acknowledgement or failure
/// reported by the backend, e.g. `{"success":false,"error":"..."}`.
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Error {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Error {
    pub fn message(&self) -> &str {
        self.error.as_deref().unwrap_or("Unknown error")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "extra-derive")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_transport_with_missing_fields() {
        let json = r#"{"id":"Bus_101","nom":"Bus 101","type":"Bus","capacite":null,"zone":"Centre"}"#;
        let t: Transport = serde_json::from_str(json).unwrap();
        assert_eq!(t.name, "Bus 101");
        assert!(t.capacity.is_none());
        assert!(!t.electric);
        assert!(t.image_url.is_none());
    }

    #[test]
    fn serialize_payload_with_wire_names() {
        let payload = EventPayload {
            name: "Accident X".into(),
            kind: "Accident".into(),
            description: None,
            severity: 3,
            date: Some("2024-05-01".into()),
            image_url: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nom": "Accident X",
                "type": "Accident",
                "gravite": 3,
                "date": "2024-05-01"
            })
        );
    }

    #[test]
    fn stats_default_missing_counters_to_zero() {
        let stats: Stats = serde_json::from_str(r#"{"totalUsers":4,"totalEvents":2}"#).unwrap();
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.total_zones, 0);
        let stats: Stats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn error_message() {
        let err: Error = serde_json::from_str(r#"{"success":false,"error":"No question provided"}"#)
            .unwrap();
        assert_eq!(err.success, Some(false));
        assert_eq!(err.to_string(), "No question provided");
        assert_eq!(Error::default().to_string(), "Unknown error");
    }
}
