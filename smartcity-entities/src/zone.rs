use std::fmt;

use strum::EnumString;

use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ZoneType {
    #[default]
    #[strum(serialize = "CentreVille", serialize = "CityCenter")]
    CityCenter,
    #[strum(serialize = "Banlieue", serialize = "Suburb")]
    Suburb,
    #[strum(serialize = "ZoneIndustrielle", serialize = "Industrial")]
    Industrial,
    #[strum(serialize = "ZoneResidentielle", serialize = "Residential")]
    Residential,
    #[strum(serialize = "ZoneCommerciale", serialize = "Commercial")]
    Commercial,
    #[strum(default)]
    Other(String),
}

impl ZoneType {
    pub const ALL: [Self; 5] = [
        Self::CityCenter,
        Self::Suburb,
        Self::Industrial,
        Self::Residential,
        Self::Commercial,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::CityCenter => "CentreVille",
            Self::Suburb => "Banlieue",
            Self::Industrial => "ZoneIndustrielle",
            Self::Residential => "ZoneResidentielle",
            Self::Commercial => "ZoneCommerciale",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id          : Id,
    pub name        : String,
    pub kind        : ZoneType,
    /// km²
    pub area        : Option<f64>,
    pub population  : Option<u64>,
    pub description : Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePayload {
    pub name        : String,
    pub kind        : ZoneType,
    pub area        : Option<f64>,
    pub population  : Option<u64>,
    pub description : Option<String>,
}
