//! Command implementations for sheetdiff CLI

use crate::cli::{Cli, Commands, OutputFormat};
use crate::compare::{CancelToken, Comparator, ComparisonResult};
use crate::config::Config;
use crate::error::{Result, SheetDiffError};
use crate::output::{HtmlFormatter, JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::reconcile::reconcile;
use crate::server;
use crate::source::{fetch_pair, DirectorySource, DocumentSource};
use std::path::Path;
use std::sync::Arc;

/// Resolve configuration from the config file and global flags
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.documents_dir {
        config.documents_dir = dir.clone();
    }
    Ok(config)
}

/// Execute a command
pub fn execute_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Compare {
            old,
            new,
            format,
            halt_on_mismatch,
            output,
        } => {
            let source = DirectorySource::new(&config.documents_dir);
            let halt = halt_on_mismatch || config.halt_on_mismatch;
            compare_command(&source, &config, &old, &new, format, halt, output.as_deref())
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            serve_command(&config, &bind)
        }
        Commands::List => list_command(&config),
    }
}

/// Compare two documents and print or write the report
pub fn compare_command(
    source: &dyn DocumentSource,
    config: &Config,
    old: &str,
    new: &str,
    format: OutputFormat,
    halt_on_mismatch: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut progress = if format.is_interactive() && output.is_none() {
        ProgressReporter::new_for_compare()
    } else {
        ProgressReporter::new_minimal()
    };

    let (old_doc, new_doc) = fetch_pair(source, old, new)?;
    progress.finish_fetch(&format!("Fetched {} and {}", old_doc.id, new_doc.id));

    if halt_on_mismatch {
        let report = reconcile(&old_doc, &new_doc);
        if !(report.same_set && report.same_order) {
            drop(progress);
            print!("{}", PrettyPrinter::format_reconciliation(&report));
            return Err(SheetDiffError::structure_mismatch(report.summary()));
        }
    }

    let comparator = Comparator::new(config.worker_threads)?;
    let result =
        comparator.compare_with_progress(&old_doc, &new_doc, &CancelToken::new(), &progress)?;
    progress.finish_sheets(&format!("Diffed {} sheets", result.sheets.len()));
    drop(progress);

    let rendered = render_result(&result, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("✅ Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Render a result in the requested format
pub fn render_result(result: &ComparisonResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(PrettyPrinter::format_result(result, false)),
        OutputFormat::Color => Ok(PrettyPrinter::format_result(result, true)),
        OutputFormat::Json => Ok(JsonFormatter::format(result)? + "\n"),
        OutputFormat::Html => Ok(HtmlFormatter::format_page(result, chrono::Utc::now())),
    }
}

/// Run the HTTP service until interrupted
fn serve_command(config: &Config, bind: &str) -> Result<()> {
    let source: Arc<dyn DocumentSource> = Arc::new(DirectorySource::new(&config.documents_dir));
    let comparator = Comparator::new(config.worker_threads)?;

    log::info!(
        "Serving documents from {}",
        config.documents_dir.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(bind, source, comparator))
}

/// List available documents
fn list_command(config: &Config) -> Result<()> {
    let source = DirectorySource::new(&config.documents_dir);
    let ids = source.list()?;

    if ids.is_empty() {
        println!("No documents found in {}.", source.root().display());
        return Ok(());
    }

    println!("📚 Available documents:");
    for (i, id) in ids.iter().enumerate() {
        let prefix = if i == ids.len() - 1 { "└─" } else { "├─" };
        println!("{} {}", prefix, id);
    }
    Ok(())
}
