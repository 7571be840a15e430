use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use te2canvas::cli::Cli;
use te2canvas::{app, Config, ImportError};

#[tokio::main]
async fn main() {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    info!("Starting te2canvas");

    // The import runs on its own task so Ctrl-C takes effect even while it
    // blocks on the confirmation prompt. Already-created events stay created.
    let import = tokio::spawn(run(cli));
    tokio::select! {
        joined = import => {
            let result = joined.unwrap_or_else(|err| Err(anyhow::Error::new(err)));
            if let Err(err) = result {
                if is_cancellation(&err) {
                    println!("Import cancelled.");
                    return;
                }
                error!("{err:#}");
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nImport cancelled by user.");
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    app::run(&config, cli.yes, cli.dry_run).await
}

/// A declined prompt surfaces as an error value but is a graceful exit, not
/// a failure.
fn is_cancellation(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ImportError>(), Some(ImportError::Cancelled))
}
