use std::fmt;

use strum::EnumString;

use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum UserType {
    #[default]
    #[strum(serialize = "Citoyen", serialize = "Citizen")]
    Citizen,
    #[strum(serialize = "Touriste", serialize = "Tourist")]
    Tourist,
    #[strum(default)]
    Other(String),
}

impl UserType {
    pub const ALL: [Self; 2] = [Self::Citizen, Self::Tourist];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Citizen => "Citoyen",
            Self::Tourist => "Touriste",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id                : Id,
    pub name              : String,
    pub age               : Option<u32>,
    pub email             : Option<String>,
    pub kind              : UserType,
    pub subscription_card : bool,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload {
    pub name              : String,
    pub age               : Option<u32>,
    pub email             : Option<String>,
    pub kind              : UserType,
    pub subscription_card : bool,
}
