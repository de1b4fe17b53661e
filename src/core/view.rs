use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::connections::RenderModel;
use crate::core::render::{Attributes, RenderError, Renderer, Value};

pub const VIEW_TEMPLATE: &str = "interface_view";
pub const CONNECTION_TEMPLATE: &str = "connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Render through the template group
    Template,
    /// Dump the render model as YAML
    Yaml,
    /// Dump the render model as JSON
    Json,
}

/// Renders every connection with the `connection` template, then the whole view
/// with `interface_view`.
pub fn render_interface_view(
    model: &RenderModel,
    renderer: &dyn Renderer,
) -> Result<String, RenderError> {
    let connections = model
        .connections
        .iter()
        .map(|connection| {
            debug!("Rendering connection {} <- {}", connection.from, connection.to);
            renderer.render(CONNECTION_TEMPLATE, &connection.to_attributes())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut attributes = Attributes::new();
    attributes.insert(
        "arrsFunctNames".to_string(),
        Value::from(model.component_names.clone()),
    );
    attributes.insert("arrsConnections".to_string(), Value::from(connections));

    info!(
        "Rendering interface view with {} functions and {} connections",
        model.component_names.len(),
        model.connections.len()
    );
    renderer.render(VIEW_TEMPLATE, &attributes)
}

pub fn render_model(
    model: &RenderModel,
    format: OutputFormat,
    renderer: &dyn Renderer,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Template => render_interface_view(model, renderer),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(model)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(model)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connections::Connection;
    use crate::core::render::TemplateGroup;

    fn model() -> RenderModel {
        RenderModel {
            component_names: vec!["A".into(), "B".into()],
            connections: vec![Connection::new("A", "B", vec!["x".into(), "z".into()])],
        }
    }

    #[test]
    fn bundled_group_renders_plantuml() {
        let group = TemplateGroup::bundled().unwrap();

        let out = render_interface_view(&model(), &group).unwrap();

        assert_eq!(
            out,
            "@startuml\nparticipant A\nparticipant B\nB -> A : x, z\n@enduml"
        );
    }

    #[test]
    fn custom_group_receives_every_attribute() {
        let group: TemplateGroup = r#"
interface_view(arrsFunctNames, arrsConnections) ::= <<
[$arrsFunctNames; separator=","$] $arrsConnections; separator=" | "$
>>
connection(sFrom, sTo, arrsMessages) ::= << $sFrom$<-$sTo$:$arrsMessages; separator="+"$ >>
"#
        .parse()
        .unwrap();

        let mut model = model();
        model
            .connections
            .push(Connection::new("B", "A", vec!["y".into()]));

        assert_eq!(
            render_interface_view(&model, &group).unwrap(),
            "[A,B] A<-B:x+z | B<-A:y"
        );
    }

    #[test]
    fn group_without_connection_template_fails() {
        let group: TemplateGroup = "interface_view(arrsFunctNames, arrsConnections) ::= << x >>"
            .parse()
            .unwrap();

        assert!(matches!(
            render_interface_view(&model(), &group),
            Err(RenderError::UnknownTemplate(name)) if name == CONNECTION_TEMPLATE
        ));
    }

    #[test]
    fn json_dump_keeps_model_shape() {
        let group = TemplateGroup::bundled().unwrap();

        let out = render_model(&model(), OutputFormat::Json, &group).unwrap();
        let parsed: RenderModel = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed, model());
    }

    #[test]
    fn yaml_dump() {
        let group = TemplateGroup::bundled().unwrap();

        let out = render_model(&model(), OutputFormat::Yaml, &group).unwrap();

        assert_eq!(
            out,
            "component_names:\n- A\n- B\nconnections:\n- from: A\n  to: B\n  messages:\n  - x\n  - z\n"
        );
    }
}
