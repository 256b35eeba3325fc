//! Print the OpenAPI document as JSON.

use std::path::PathBuf;

use bloglist::doc::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Dump the bloglist OpenAPI document")]
struct Cli {
    /// Write the document to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let json = ApiDoc::openapi().to_pretty_json()?;
    match cli.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
