use clap::Args;
use colored::Colorize;
use schemadoc_core::RouteTable;
use schemadoc_openapi::SchemaDoc;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::CliError;

/// Arguments of the `schema` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SchemaArgs {
    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Render the document for `routes` as JSON text.
pub fn render_schema(doc: &SchemaDoc, routes: &RouteTable, compact: bool) -> Result<String, CliError> {
    let value = doc.document_value(routes)?;
    let text = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(text)
}

/// Run the `schema` command.
pub fn run_schema(doc: &SchemaDoc, routes: &RouteTable, args: &SchemaArgs) -> Result<(), CliError> {
    let text = render_schema(doc, routes, args.compact)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{text}\n"))?;
            println!(
                "{} {}",
                "Wrote OpenAPI document to".green(),
                path.display().to_string().bold()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}
