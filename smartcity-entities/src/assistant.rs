use std::collections::BTreeMap;

/// Answer of the natural language query assistant.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question        : String,
    pub generated_query : Option<String>,
    pub rows            : Vec<BTreeMap<String, String>>,
    pub explanation     : Option<String>,
}
