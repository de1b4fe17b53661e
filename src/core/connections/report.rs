use indexmap::IndexMap;

use super::{Connection, RenderModel};
use crate::models::Function;

/// Findings about connection peers. Purely informative: grouping never drops or
/// rewrites a connection because of what is reported here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PeerReport {
    /// Connections whose distant function is not part of the view
    pub dangling: Vec<Connection>,
    /// Functions that receive nothing from anyone
    pub isolated: Vec<String>,
}

impl PeerReport {
    pub fn check(functions: &IndexMap<String, Function>, model: &RenderModel) -> Self {
        let mut report = Self::default();

        for connection in &model.connections {
            if !functions.contains_key(&connection.to) {
                report.dangling.push(connection.clone());
            }
        }

        for name in &model.component_names {
            if model.connections_from(name).next().is_none() {
                report.isolated.push(name.clone());
            }
        }

        report
    }

    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.dangling
            .iter()
            .map(|c| {
                format!(
                    "{} receives {} from unknown function {}",
                    c.from,
                    c.messages.join(", "),
                    c.to
                )
            })
            .collect()
    }

    /// Returns a summary of the report
    pub fn summary(&self) -> String {
        let mut summary = Vec::new();

        if !self.dangling.is_empty() {
            summary.push(format!(
                "{} to unknown functions",
                counted(self.dangling.len(), "connection")
            ));
        }

        if !self.isolated.is_empty() {
            summary.push(format!(
                "{} without received interfaces",
                counted(self.isolated.len(), "function")
            ));
        }

        if summary.is_empty() {
            "All connections reach known functions".to_string()
        } else {
            summary.join(", ")
        }
    }
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connections::group;
    use crate::models::Interface;

    fn view() -> IndexMap<String, Function> {
        let mut functions = IndexMap::new();
        functions.insert(
            "A".to_string(),
            Function::with_interfaces([
                ("x", Interface::received("B")),
                ("w", Interface::received("ghost")),
            ]),
        );
        functions.insert("B".to_string(), Function::default());
        functions
    }

    #[test]
    fn reports_dangling_peers_without_touching_the_model() {
        let functions = view();
        let model = group(&functions);
        let before = model.clone();

        let report = PeerReport::check(&functions, &model);

        assert_eq!(model, before);
        assert_eq!(model.connections.len(), 2);
        assert_eq!(
            report.dangling,
            vec![Connection::new("A", "ghost", vec!["w".into()])]
        );
        assert_eq!(report.isolated, vec!["B".to_string()]);
        assert!(!report.is_clean());
        assert_eq!(
            report.warnings(),
            vec!["A receives w from unknown function ghost".to_string()]
        );
        assert_eq!(
            report.summary(),
            "1 connection to unknown functions, 1 function without received interfaces"
        );
    }

    #[test]
    fn summary_counts_are_pluralised() {
        let mut functions = view();
        functions.insert(
            "C".to_string(),
            Function::with_interfaces([("v", Interface::received("phantom"))]),
        );
        functions.insert("D".to_string(), Function::default());
        let model = group(&functions);

        let report = PeerReport::check(&functions, &model);

        assert_eq!(
            report.summary(),
            "2 connections to unknown functions, 2 functions without received interfaces"
        );
    }

    #[test]
    fn clean_view_summary() {
        let mut functions = IndexMap::new();
        functions.insert(
            "A".to_string(),
            Function::with_interfaces([("x", Interface::received("A"))]),
        );
        let model = group(&functions);

        let report = PeerReport::check(&functions, &model);

        assert!(report.is_clean());
        assert_eq!(report.summary(), "All connections reach known functions");
    }
}
