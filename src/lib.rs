use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

pub mod cli;
pub mod core;
pub mod models;

use crate::cli::Ivview;
use crate::core::view::{CONNECTION_TEMPLATE, VIEW_TEMPLATE};
use crate::core::{
    encode, group, load_interface_view, render_model, Encoding, OutputFormat, PeerReport,
    TemplateGroup,
};

/// Everything a run needs, taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub templates: Option<PathBuf>,
    pub format: OutputFormat,
    pub encoding: Encoding,
}

impl From<&Ivview> for RunOptions {
    fn from(args: &Ivview) -> Self {
        Self {
            input: args.input.clone(),
            templates: args.templates.clone(),
            format: args.format,
            encoding: args.encoding,
        }
    }
}

/// Loads the interface view, groups its connections and renders them.
///
/// Returns the encoded text followed by a newline.
pub fn run(options: &RunOptions) -> anyhow::Result<Vec<u8>> {
    let view = load_interface_view(&options.input)
        .with_context(|| format!("Failed to load {}", options.input.display()))?;

    info!(
        "Loaded functions: {}",
        view.function_names()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let model = group(&view.functions);

    let report = PeerReport::check(&view.functions, &model);
    if !report.is_clean() {
        for warning in report.warnings() {
            warn!("{}", warning);
        }
    }
    info!("{}", report.summary());

    let renderer = match &options.templates {
        Some(path) => TemplateGroup::from_file(path)
            .with_context(|| format!("Failed to load templates from {}", path.display()))?,
        None => TemplateGroup::bundled().context("Failed to load bundled templates")?,
    };

    if options.format == OutputFormat::Template {
        for required in [VIEW_TEMPLATE, CONNECTION_TEMPLATE] {
            if !renderer.contains(required) {
                anyhow::bail!(
                    "Template group does not define {} (found: {})",
                    required,
                    renderer
                        .template_names()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
    }

    let text = render_model(&model, options.format, &renderer)
        .context("Failed to render interface view")?;

    let mut bytes = encode(&text, options.encoding).context("Failed to encode interface view")?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Writes the rendered view to `output`, or to stdout when no file is given
pub fn write_output(output: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}
