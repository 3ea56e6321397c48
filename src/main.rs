//! envelope-docs CLI entrypoint
//! Parses command-line arguments and dispatches to the rewrite pass.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use envelope_docs::application::{
    OpenApiLoader, RewriteDocumentRequest, RewriteDocumentUseCase,
};
use envelope_docs::core::config::RewriteConfig;
use envelope_docs::infrastructure::openapi::{
    CompositeOpenApiLoader, FileSystemDocumentOutput, STDOUT_TARGET,
};
use envelope_docs::rewrite::ReturnKind;
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "envelope-docs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Rewrite response schemas to the { data, page } envelope
    Rewrite {
        /// Path or URL of the OpenAPI document (YAML or JSON)
        #[arg(long)]
        schema_path: String,
        /// Return-type manifest (TOML)
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Kind assumed for operations missing from the manifest
        #[arg(long)]
        default_kind: Option<ReturnKind>,
        /// Output file; `.yaml`/`.yml` writes YAML, `-` writes to stdout
        #[arg(long, default_value = STDOUT_TARGET)]
        output: String,
    },
    /// List the operations of a document with the return type each one resolves to
    Operations {
        /// Path or URL of the OpenAPI document (YAML or JSON)
        #[arg(long)]
        schema_path: String,
        /// Return-type manifest (TOML)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that `--output -` can write the document to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Rewrite {
            schema_path,
            manifest,
            default_kind,
            output,
        } => run_rewrite(schema_path, manifest, default_kind, output).await?,
        Commands::Operations {
            schema_path,
            manifest,
        } => run_operations(&schema_path, manifest).await?,
    }
    Ok(())
}

async fn load_config(manifest: Option<PathBuf>) -> anyhow::Result<RewriteConfig> {
    match manifest {
        Some(path) => RewriteConfig::load_from_path(&path)
            .await
            .with_context(|| format!("Failed to load manifest {}", path.display())),
        None => Ok(RewriteConfig::default()),
    }
}

/// Runtime handler for the rewrite command
async fn run_rewrite(
    schema_path: String,
    manifest: Option<PathBuf>,
    default_kind: Option<ReturnKind>,
    output: String,
) -> anyhow::Result<()> {
    let mut config = load_config(manifest).await?;
    if let Some(kind) = default_kind {
        config.default_kind = kind;
    }

    info!(schema_path = %schema_path, output = %output, "Rewriting OpenAPI document");

    let loader = CompositeOpenApiLoader::new().context("Failed to initialize document loader")?;
    let use_case =
        RewriteDocumentUseCase::new(Arc::new(loader), Arc::new(FileSystemDocumentOutput::new()));

    let summary = use_case
        .execute(RewriteDocumentRequest {
            source: schema_path,
            target: output,
            config,
        })
        .await
        .context("Failed to rewrite OpenAPI document")?;

    info!(
        rewritten = summary.rewritten,
        replaced_slots = summary.replaced_slots,
        "Done"
    );
    Ok(())
}

/// Runtime handler for the operations command
async fn run_operations(schema_path: &str, manifest: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(manifest).await?;
    let loader = CompositeOpenApiLoader::new().context("Failed to initialize document loader")?;
    let document = loader
        .load(schema_path)
        .await
        .context("Failed to load OpenAPI document")?;

    let operations = document.operations();
    if operations.is_empty() {
        println!("No operations found.");
        return Ok(());
    }

    for operation in &operations {
        let return_type = config.return_type_for(operation);
        let status = if config.is_excluded(&operation.path) {
            "excluded".to_string()
        } else {
            match return_type.element_name() {
                Some(element) => format!("{}<{}>", return_type.kind, element),
                None => return_type.kind.to_string(),
            }
        };
        let slots: usize = operation
            .responses
            .values()
            .map(|content| content.values().filter(|slot| slot.is_some()).count())
            .sum();
        println!(
            "{:<40} {:<24} {} schema(s)",
            operation.label(),
            status,
            slots
        );
    }
    println!("\nFound {} operation(s)", operations.len());
    Ok(())
}
