use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, project, CompressionView, HttpCompressionService, PathEncoding, Submitter,
    WordStyle,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Compress one sentence against the compression service")]
struct Args {
    /// Sentence to compress, sent exactly as given
    #[arg(allow_hyphen_values = true)]
    sentence: String,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Append the sentence to the endpoint without percent-encoding it
    #[arg(long)]
    raw_path: bool,
    /// Print the annotation sequence, or the failure notice, as JSON
    #[arg(long)]
    json: bool,
}

fn render_annotated(view: &CompressionView<'_>) -> String {
    view.annotated()
        .iter()
        .map(|unit| match unit.style {
            WordStyle::Kept => unit.word.to_string(),
            WordStyle::Removed => format!("~{}~", unit.word),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.base_endpoint = endpoint;
    }
    if args.raw_path {
        settings.path_encoding = PathEncoding::Raw;
    }

    let service = HttpCompressionService::new(&settings)
        .with_context(|| format!("cannot use endpoint '{}'", settings.base_endpoint))?;
    let submitter = Submitter::new(Arc::new(service));
    let outcome = submitter.submit(args.sentence).outcome().await;
    let sequence = match outcome.result {
        Ok(sequence) => sequence,
        Err(err) => {
            if args.json {
                let notice = err.to_notice(outcome.request_id);
                println!("{}", serde_json::to_string_pretty(&notice)?);
            }
            return Err(anyhow::Error::new(err)
                .context(format!("request #{} failed", outcome.request_id.0)));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sequence)?);
        return Ok(());
    }

    let view = project(&sequence);
    println!("Compression: {}", render_annotated(&view));
    println!("Result:      {}", view.compressed_sentence());
    Ok(())
}
