use std::fmt;

use strum::EnumString;

use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum StationType {
    #[default]
    #[strum(serialize = "StationBus", serialize = "BusStation")]
    Bus,
    #[strum(to_string = "StationMétro", serialize = "StationMetro", serialize = "MetroStation")]
    Metro,
    Parking,
    #[strum(to_string = "StationVélo", serialize = "StationVelo", serialize = "BikeStation")]
    Bike,
    #[strum(default)]
    Other(String),
}

impl StationType {
    pub const ALL: [Self; 4] = [Self::Bus, Self::Metro, Self::Parking, Self::Bike];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bus => "StationBus",
            Self::Metro => "StationMétro",
            Self::Parking => "Parking",
            Self::Bike => "StationVélo",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id        : Id,
    pub name      : String,
    pub kind      : StationType,
    pub latitude  : Option<f64>,
    pub longitude : Option<f64>,
}

impl Station {
    /// Link to the position on an external map.
    pub fn maps_url(&self) -> Option<String> {
        let (lat, lng) = self.latitude.zip(self.longitude)?;
        Some(format!("https://www.google.com/maps?q={lat},{lng}"))
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct StationPayload {
    pub name      : String,
    pub kind      : StationType,
    pub latitude  : f64,
    pub longitude : f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_type_aliases() {
        assert_eq!("StationBus".parse::<StationType>().unwrap(), StationType::Bus);
        assert_eq!("BusStation".parse::<StationType>().unwrap(), StationType::Bus);
        assert_eq!("stationmétro".parse::<StationType>().unwrap(), StationType::Metro);
        assert_eq!("parking".parse::<StationType>().unwrap(), StationType::Parking);
        assert_eq!(StationType::Bike.to_string(), "StationVélo");
    }

    #[test]
    fn maps_url_requires_both_coordinates() {
        let mut station = Station {
            id: "s1".into(),
            name: "Barcelone".into(),
            kind: StationType::Metro,
            latitude: Some(36.8065),
            longitude: None,
        };
        assert!(station.maps_url().is_none());
        station.longitude = Some(10.1815);
        assert_eq!(
            station.maps_url().as_deref(),
            Some("https://www.google.com/maps?q=36.8065,10.1815")
        );
    }
}
