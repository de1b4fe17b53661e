//! ivview - interface view renderer

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ivview::cli::Ivview;
use ivview::RunOptions;

fn main() -> Result<()> {
    let args = Ivview::parse();

    // stdout carries the rendered view, logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let bytes = ivview::run(&RunOptions::from(&args))?;
    ivview::write_output(args.output.as_deref(), &bytes)
}
