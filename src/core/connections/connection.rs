use serde::Deserialize;
use serde::Serialize;

use crate::core::render::{Attributes, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Connection {
    /// The function receiving the messages.
    pub from: String,
    /// The distant function the messages come from. Not required to name a known function.
    pub to: String,
    /// Received interface names, in the order they were declared on `from`. Never empty.
    pub messages: Vec<String>,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            messages,
        }
    }

    /// Attributes handed to the `connection` template
    pub fn to_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("sFrom".to_string(), Value::from(self.from.as_str()));
        attributes.insert("sTo".to_string(), Value::from(self.to.as_str()));
        attributes.insert("arrsMessages".to_string(), Value::from(self.messages.clone()));
        attributes
    }
}
