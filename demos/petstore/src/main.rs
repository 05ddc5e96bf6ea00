use clap::{Parser, Subcommand};
use colored::Colorize;
use petstore::{app, routes, schema_doc, PetStore};
use schemadoc_cli::{run_routes, run_schema, SchemaArgs};
use schemadoc_core::{init_tracing, SchemaDocConfig};

#[derive(Parser)]
#[command(name = "petstore", version, about = "Pet store demo documented with schemadoc")]
struct Cli {
    /// Configuration profile (overridden by SCHEMADOC_PROFILE)
    #[arg(long, default_value = "dev", global = true)]
    profile: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Print or write the OpenAPI document
    Schema(SchemaArgs),
    /// List documented routes
    Routes,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match SchemaDocConfig::load(&cli.profile) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to empty configuration");
            SchemaDocConfig::empty()
        }
    };
    let doc = match schema_doc(&config) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{}", format!("Error: {err}").red());
            std::process::exit(1);
        }
    };

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Some(Command::Schema(args)) => {
            run_schema(&doc, routes().table(), &args).map_err(Into::into)
        }
        Some(Command::Routes) => {
            run_routes(routes().table());
            Ok(())
        }
        Some(Command::Serve { addr }) => serve(&doc, &addr).await,
        None => serve(&doc, "127.0.0.1:3000").await,
    };

    if let Err(err) = result {
        eprintln!("{}", format!("Error: {err}").red());
        std::process::exit(1);
    }
}

async fn serve(doc: &schemadoc_openapi::SchemaDoc, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = app(doc, PetStore::seeded());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, title = doc.title(), "petstore listening");
    axum::serve(listener, router).await?;
    Ok(())
}
