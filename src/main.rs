use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use packcheck::checker::{Checker, DEFAULT_NAMESPACE};
use packcheck::diagnostics::{ConsoleSink, DiagnosticSink, Severity};
use packcheck::pack::Pack;

#[derive(Parser)]
#[command(name = "packcheck")]
#[command(about = "Check that all referenced files in rules and actions exist", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the pack root directory
    #[arg(short = 'p', long = "pack-location")]
    pack_location: PathBuf,

    /// Include debug-level diagnostics (file-exists confirmations)
    #[arg(short, long)]
    debug: bool,

    /// Namespace whose action references are validated; references into
    /// other namespaces are skipped
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let sink = ConsoleSink::new(cli.debug);
    sink.emit(
        Severity::Info,
        &format!(
            "Checking references in pack at {}",
            cli.pack_location.display()
        ),
    );

    let pack = Pack::new(cli.pack_location);
    let checker = Checker::new(pack, cli.namespace, &sink);
    let summary = checker.check_pack()?;

    if summary.is_clean() {
        println!(
            "{} Checked {} references in {} documents",
            "✓".green(),
            summary.references,
            summary.documents
        );
        Ok(())
    } else {
        eprintln!(
            "{} {} unresolved reference(s) across {} documents",
            "✗".red(),
            summary.errors,
            summary.documents
        );
        std::process::exit(1);
    }
}
