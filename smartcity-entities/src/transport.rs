use std::fmt;

use strum::EnumString;

use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TransportType {
    #[default]
    Bus,
    #[strum(to_string = "Métro", serialize = "Metro")]
    Metro,
    #[strum(to_string = "Vélo", serialize = "Velo", serialize = "Bike")]
    Bike,
    #[strum(to_string = "VoiturePartagée", serialize = "VoiturePartagee", serialize = "SharedCar")]
    SharedCar,
    #[strum(to_string = "Trottinette", serialize = "Scooter")]
    Scooter,
    /// A type the client does not know (yet).
    #[strum(default)]
    Other(String),
}

impl TransportType {
    pub const ALL: [Self; 5] = [
        Self::Bus,
        Self::Metro,
        Self::Bike,
        Self::SharedCar,
        Self::Scooter,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bus => "Bus",
            Self::Metro => "Métro",
            Self::Bike => "Vélo",
            Self::SharedCar => "VoiturePartagée",
            Self::Scooter => "Trottinette",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    pub id              : Id,
    pub name            : String,
    pub kind            : TransportType,
    pub capacity        : Option<u32>,
    pub registration    : Option<String>,
    /// km/h
    pub max_speed       : Option<f64>,
    pub electric        : bool,
    pub image_url       : Option<String>,
}

/// The editable fields of a [`Transport`].
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct TransportPayload {
    pub name            : String,
    pub kind            : TransportType,
    pub capacity        : Option<u32>,
    pub registration    : Option<String>,
    pub max_speed       : Option<f64>,
    pub electric        : bool,
    pub image_url       : Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_type_from_str() {
        assert_eq!("Bus".parse::<TransportType>().unwrap(), TransportType::Bus);
        assert_eq!("bus".parse::<TransportType>().unwrap(), TransportType::Bus);
        assert_eq!("Métro".parse::<TransportType>().unwrap(), TransportType::Metro);
        assert_eq!("metro".parse::<TransportType>().unwrap(), TransportType::Metro);
        assert_eq!("SharedCar".parse::<TransportType>().unwrap(), TransportType::SharedCar);
        assert_eq!("Trottinette".parse::<TransportType>().unwrap(), TransportType::Scooter);
        assert_eq!(
            "Tramway".parse::<TransportType>().unwrap(),
            TransportType::Other("Tramway".into())
        );
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(TransportType::Bike.to_string(), "Vélo");
        assert_eq!(TransportType::Other("Tram".into()).to_string(), "Tram");
        for t in TransportType::ALL {
            assert_eq!(t.to_string().parse::<TransportType>().unwrap(), t);
        }
    }
}
