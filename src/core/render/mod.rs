use std::path::PathBuf;

use indexmap::IndexMap;

mod encoding;
mod template;
pub use encoding::{encode, EncodeError, Encoding};
pub use template::TemplateGroup;

/// Named values handed to a template, in insertion order
pub type Attributes = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("Template {template} has no value for attribute {attribute}")]
    MissingAttribute { template: String, attribute: String },
    #[error("Template {template} does not declare attribute {attribute}")]
    UndeclaredAttribute { template: String, attribute: String },
    #[error("Template group error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Failed to read template group {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize render model as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to serialize render model as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns a named template and its attributes into text
pub trait Renderer {
    fn render(&self, template: &str, attributes: &Attributes) -> Result<String, RenderError>;
}
