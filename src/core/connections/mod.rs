use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod connection;
mod report;
pub use connection::Connection;
pub use report::PeerReport;

use crate::models::{Function, Interface};

/// Plain data handed to the renderer
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    /// Every function name, in input order
    pub component_names: Vec<String>,
    pub connections: Vec<Connection>,
}

impl RenderModel {
    /// Connections originating from `from`, in emission order
    pub fn connections_from<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.from == from)
    }
}

/// Groups the received interfaces of every function by distant function.
///
/// Functions are visited in map order and each one is grouped on its own, so the
/// connections of a function never depend on the interfaces of another. A function
/// without received interfaces contributes no connection but is still listed in
/// `component_names`.
pub fn group(functions: &IndexMap<String, Function>) -> RenderModel {
    let mut model = RenderModel {
        component_names: functions.keys().cloned().collect(),
        connections: Vec::new(),
    };

    for (from, function) in functions {
        model
            .connections
            .extend(group_function(from, &function.interfaces));
    }

    debug!(
        functions = model.component_names.len(),
        connections = model.connections.len(),
        "Grouped interface view"
    );
    model
}

/// Groups one function's received interfaces by distant function.
///
/// Peers are emitted in the order they are first seen and messages keep the
/// declaration order of the interfaces. Distant function names are taken as-is.
pub fn group_function(from: &str, interfaces: &IndexMap<String, Interface>) -> Vec<Connection> {
    let mut group: IndexMap<&str, Vec<String>> = IndexMap::new();

    for (name, interface) in interfaces {
        if !interface.direction.is_received() {
            debug!("  Skipping {} interface {}.{}", interface.direction, from, name);
            continue;
        }
        group
            .entry(interface.distant_function.as_str())
            .or_default()
            .push(name.clone());
    }

    group
        .into_iter()
        .map(|(to, messages)| {
            debug!("  Connection {} <- {}: {:?}", from, to, messages);
            Connection::new(from, to, messages)
        })
        .collect()
}
