use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::models::InterfaceView;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read interface view {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse interface view as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse interface view as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

impl InterfaceView {
    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }
}

pub fn load_interface_view(path: &Path) -> Result<InterfaceView, LoadError> {
    let format = SourceFormat::from_path(path);
    info!("Loading interface view from {} ({:?})", path.display(), format);

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let view = match format {
        SourceFormat::Yaml => InterfaceView::from_yaml_str(&content)?,
        SourceFormat::Json => InterfaceView::from_json_str(&content)?,
    };

    for (name, function) in &view.functions {
        debug!("  Function {} with {} interfaces", name, function.interfaces.len());
    }
    Ok(view)
}
