// src/main.rs

use anyhow::Result;
use blsync::checksum::ChecksumType;
use blsync::config::{DEFAULT_MANIFEST_URL, SyncOptions, default_install_root};
use blsync::progress::ConsoleProgress;
use blsync::prompt::{AssumeYes, Confirm, TerminalPrompt};
use blsync::repository::RepositoryClient;
use blsync::sync::{self, SyncReport};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "blsync")]
#[command(author, version, about = "Bring a Blockland installation up to date with the update server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Install to specified directory (default: ./Blockland)
    #[arg(short = 'p', long)]
    profile_path: Option<PathBuf>,

    /// Use manifest file instead of asking the update server
    #[arg(short, long, conflicts_with = "manifest_url")]
    manifest: Option<PathBuf>,

    /// Update server endpoint
    #[arg(long, default_value = DEFAULT_MANIFEST_URL)]
    manifest_url: String,

    /// List out of date files
    #[arg(short, long)]
    verbose: bool,

    /// Don't ask to confirm updates
    #[arg(short, long)]
    ignore: bool,

    /// Don't update, just check
    #[arg(short, long)]
    check: bool,

    /// Hash algorithm used by the manifest (sha1, sha256)
    #[arg(long, default_value = "sha1")]
    checksum: ChecksumType,

    /// Exit with a failure status when any file could not be updated
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        shell: Shell,
    },
}

impl Cli {
    fn options(&self) -> SyncOptions {
        let install_root = self.profile_path.clone().unwrap_or_else(default_install_root);
        SyncOptions {
            manifest_path: self.manifest.clone(),
            manifest_url: self.manifest_url.clone(),
            checksum: self.checksum,
            verbose: self.verbose,
            assume_yes: self.ignore,
            check_only: self.check,
            strict: self.strict,
            ..SyncOptions::new(install_root)
        }
    }
}

fn print_summary(report: &SyncReport, options: &SyncOptions) {
    let root = options.install_root().display();
    match report {
        SyncReport::ManifestUnavailable => println!("No update information available, nothing to do."),
        SyncReport::UpToDate if options.check_only => {
            println!("\nThe installation at {} is up to date.", root)
        }
        SyncReport::UpToDate => println!("\nAll files are already up to date."),
        SyncReport::CheckOnly { pending } => {
            println!("\nUpdates are available for installation at {}", root);
            println!("{} files are out of date or missing", pending);
        }
        SyncReport::NoRemote { pending } => {
            println!("\n{} files are out of date or missing, but no download location is published.", pending)
        }
        SyncReport::Declined { .. } => println!("Update cancelled."),
        SyncReport::Applied { .. } => {
            let failed = report.failed_count();
            if failed > 0 {
                println!("{} files could not be updated.", failed);
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "blsync", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let options = cli.options();
    info!("Synchronizing installation at {}", options.install_root().display());

    let client = RepositoryClient::new()?;
    let mut confirm: Box<dyn Confirm> = if options.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt)
    };
    let mut progress = ConsoleProgress::new();

    let report = sync::run(&options, &client, confirm.as_mut(), &mut progress)?;
    print_summary(&report, &options);

    if options.strict && report.failed_count() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
