use clap::Parser;
use std::path::PathBuf;

/// te2canvas - import a TimeEdit CSV schedule export into a Canvas course calendar
#[derive(Debug, Parser)]
#[command(name = "te2canvas")]
#[command(about = "Import a TimeEdit CSV schedule export into a Canvas course calendar")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short, default_value = "te2canvas.toml")]
    pub config: PathBuf,

    /// Skip the confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Parse and list the events without creating anything in Canvas
    #[arg(long)]
    pub dry_run: bool,
}
