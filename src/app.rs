//! Top-level run driver: banner, dry-run listing, confirmation prompt,
//! submission and summary.

use anyhow::Result;
use log::info;
use std::fs;
use std::io::{self, Write};

use crate::canvas::{self, CanvasClient};
use crate::config::Config;
use crate::error::ImportError;
use crate::event::Event;
use crate::format;
use crate::parser;

const RULE: &str =
    "================================================================================";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub async fn run(config: &Config, assume_yes: bool, dry_run: bool) -> Result<()> {
    print_banner(config);

    info!("Parsing TimeEdit CSV file");
    println!("Parsing TimeEdit CSV file...");
    let content = read_source(&config.csv_file)?;
    let events = parser::parse_events(&content, config.timezone_offset)?;
    println!("Found {} events to import\n", events.len());

    list_events(&events);

    if dry_run {
        println!("Dry run requested, stopping before any events are created.");
        return Ok(());
    }

    if !assume_yes && !confirm()? {
        return Err(ImportError::Cancelled.into());
    }

    println!("\nCreating events in Canvas...");
    println!("{}", "-".repeat(80));

    let client = CanvasClient::new(config)?;
    let (success_count, error_count) = canvas::submit_events(&client, &events).await;

    print_summary(config, success_count, error_count);
    Ok(())
}

/// Only a missing file is `SourceNotFound`; other I/O failures (permissions,
/// a directory path) keep their own diagnostics.
fn read_source(path: &std::path::Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(ImportError::SourceNotFound(path.display().to_string()).into())
        }
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("Failed to read CSV file '{}'", path.display()))),
    }
}

fn print_banner(config: &Config) {
    let season = if config.timezone_offset == 1 { "Winter" } else { "Summer" };
    println!("{RULE}");
    println!("TimeEdit CSV to Canvas Import");
    println!("{RULE}");
    println!("Canvas domain: {}", config.canvas_domain);
    println!("Course ID: {}", config.course_id);
    println!("CSV file: {}", config.csv_file.display());
    println!("Language: {}", config.language);
    println!(
        "Timezone: UTC+{} ({} Time)",
        config.timezone_offset, season
    );
    println!();
    println!("NOTE: If your events appear at the wrong time in Canvas:");
    println!("  - Winter time (late Oct - late Mar): set timezone_offset = 1");
    println!("  - Summer time (late Mar - late Oct): set timezone_offset = 2");
    println!();
}

fn list_events(events: &[Event]) {
    println!("Events to be created:");
    println!("{}", "-".repeat(80));
    for (i, event) in events.iter().enumerate() {
        println!("{}. {}", i + 1, format::event_title(event));
        println!("   Start: {}", event.start.format(DISPLAY_TIME_FORMAT));
        println!("   End: {}", event.end.format(DISPLAY_TIME_FORMAT));
        if !event.room.is_empty() {
            println!("   Room: {}", event.room);
        }
        let codes: Vec<&str> = event.course_codes().collect();
        if !codes.is_empty() {
            println!("   Courses: {}", codes.join(", "));
        }
        println!();
    }
}

fn confirm() -> Result<bool> {
    print!("Do you want to create these events in Canvas? (yes/no): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
}

fn print_summary(config: &Config, success_count: usize, error_count: usize) {
    println!("{RULE}");
    println!("Import Complete!");
    println!("{RULE}");
    println!("Successfully created: {success_count} events");
    println!("Errors: {error_count} events");
    println!();
    println!("You can now view the events in your Canvas calendar:");
    println!("{}", config.calendar_url());
    println!("{RULE}");
}
