//! Models for the interface view data source
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Direction;

/// The whole interface view: every function keyed by name, in document order
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct InterfaceView {
    #[serde(default)]
    pub functions: IndexMap<String, Function>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Function {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_with_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_nature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipfile: Option<String>,
    #[serde(default)]
    pub interfaces: IndexMap<String, Interface>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Interface {
    pub direction: Direction,
    #[serde(rename = "distant_fv", alias = "distant_component")]
    pub distant_function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronism: Option<Synchronism>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rcm: Option<Rcm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_size: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Synchronism {
    Synch,
    Asynch,
}

/// Activation pattern of an interface
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rcm {
    Cyclic,
    Sporadic,
    Variator,
    Protected,
    Unprotected,
}

impl Interface {
    pub fn new(direction: Direction, distant_function: impl Into<String>) -> Self {
        Self {
            direction,
            distant_function: distant_function.into(),
            port_name: None,
            distant_name: None,
            synchronism: None,
            rcm: None,
            period: None,
            queue_size: None,
        }
    }

    pub fn received(distant_function: impl Into<String>) -> Self {
        Self::new(Direction::RI, distant_function)
    }

    pub fn provided(distant_function: impl Into<String>) -> Self {
        Self::new(Direction::PI, distant_function)
    }
}

impl Function {
    /// Builds a function from `(interface name, interface)` pairs, keeping their order
    pub fn with_interfaces<I, S>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = (S, Interface)>,
        S: Into<String>,
    {
        Self {
            interfaces: interfaces
                .into_iter()
                .map(|(name, interface)| (name.into(), interface))
                .collect(),
            ..Default::default()
        }
    }
}

impl InterfaceView {
    pub fn function_names(&self) -> impl Iterator<Item = &String> {
        self.functions.keys()
    }
}
