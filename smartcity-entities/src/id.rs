use std::{borrow::Borrow, fmt};

/// Opaque public identifier assigned by the backend.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Id {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Id {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<Id> for String {
    fn from(from: Id) -> Self {
        from.0
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_from_and_into_string() {
        let id = Id::from(String::from("Bus_42"));
        assert_eq!(id, Id::from("Bus_42"));
        assert_eq!(id.to_string(), "Bus_42");
        assert_eq!(String::from(id), "Bus_42");
    }

    #[test]
    fn borrow_as_str_for_lookups() {
        let ids: std::collections::HashSet<Id> = ["a", "b"].into_iter().map(Id::from).collect();
        assert!(ids.contains("a"));
        assert!(!ids.contains("c"));
    }
}
