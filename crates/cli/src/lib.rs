mod scan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "djset",
    version,
    about = "Completion and go-to-definition for Django settings names",
    long_about = "djset scans the settings files you designate for top-level assignments \
                  and serves the discovered names to your editor: completion after the \
                  `settings.` prefix and go-to-definition on `settings.<NAME>` tokens."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a project's settings files once and print the discovered names
    #[command(
        long_about = "Reads each given settings file (relative to the project root, in order), \
                      extracts top-level assignment targets and prints the deduplicated, \
                      first-seen-ordered name list, one per line."
    )]
    Scan {
        /// Path to the project root directory
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,
        /// Settings file to scan, relative to the project root (repeatable)
        #[arg(short = 'f', long = "settings-file", value_name = "RELATIVE_PATH")]
        settings_files: Vec<String>,
    },
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    let _guard = djset_core::logging::init_logging(component);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Scan {
            path,
            settings_files,
        } => scan::run(path, settings_files),
        Commands::Lsp => {
            rt.block_on(djset_lsp::run_server())?;
            Ok(())
        }
    }
}
