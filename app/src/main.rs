//! Command-line host for importing and browsing SMS backup archives.

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sms_archive_core::importer::{self, AddressMode};
use sms_archive_core::phone::normalize_address;
use sms_archive_core::{diagnostics, open_archive, query, ArchiveDb};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "sms-archive", version, about = "Import and browse SMS backup files")]
struct Cli {
    /// Archive database path (defaults to the user data directory)
    #[arg(long, global = true)]
    archive: Option<PathBuf>,
    /// Keep addresses exactly as written in the backup files
    #[arg(long, global = true)]
    raw_addresses: bool,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import one or more XML backup files
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List conversations, most recent first
    Conversations,
    /// Show one conversation
    Show { address: String },
    /// Search message bodies and contact names
    Search { query: String },
    /// Show a message inside its conversation
    Context { id: i64 },
    /// Archive totals
    Stats,
    /// Delete every stored message
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.archive.as_deref(), cli.raw_addresses)?;
    let mut archive = open_archive(&config.archive_path)
        .with_context(|| format!("opening archive {}", config.archive_path.display()))?;

    let result = run(&cli, &config, &mut archive);
    if let Err(ref err) = result {
        let _ = diagnostics::log_event(&config.log_dir, "command_error", &format!("{:#}", err));
    }
    result
}

fn run(cli: &Cli, config: &AppConfig, archive: &mut ArchiveDb) -> Result<()> {
    match &cli.command {
        Command::Import { files } => {
            let plan = importer::plan_import(files)?;
            let report = importer::import_plan_with_progress(
                archive,
                &plan,
                &config.import_options(),
                |progress| {
                    if let Some(line) = render::progress_line(progress) {
                        eprintln!("{}", line);
                    }
                },
            )?;
            let _ = diagnostics::log_import_report(&config.log_dir, &report);
            if cli.json {
                print_json(&report)?;
            } else {
                for failure in &report.failures {
                    println!("failed: {} ({})", failure.file_name, failure.reason);
                }
                println!("{}", report.summary());
            }
        }
        Command::Conversations => {
            let list = query::list_conversations(&*archive)?;
            if cli.json {
                print_json(&list)?;
            } else {
                print!("{}", render::conversations(&list));
            }
        }
        Command::Show { address } => {
            let address = match config.address_mode {
                AddressMode::Normalized => normalize_address(address),
                AddressMode::Raw => address.clone(),
            };
            let Some(conversation) = query::find_conversation(&*archive, &address)? else {
                bail!("no conversation with {}", address);
            };
            if cli.json {
                print_json(&conversation.messages)?;
            } else {
                print!(
                    "{}",
                    render::messages(&conversation.label, &conversation.messages, None)
                );
            }
        }
        Command::Search { query: text } => {
            let hits = query::search_messages(&*archive, text)?;
            if cli.json {
                print_json(&hits)?;
            } else {
                print!("{}", render::search_hits(text, &hits));
            }
        }
        Command::Context { id } => {
            let ctx = query::message_in_context(&*archive, *id)?;
            if cli.json {
                print_json(&ctx)?;
            } else {
                print!("{}", render::context(&ctx));
            }
        }
        Command::Stats => {
            let stats = query::archive_stats(&*archive)?;
            if cli.json {
                print_json(&stats)?;
            } else {
                print!("{}", render::stats(&stats));
            }
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to clear the archive without --yes");
            }
            importer::clear_all(archive)?;
            let _ = diagnostics::log_event(&config.log_dir, "archive_cleared", "archive cleared");
            info!(archive = %config.archive_path.display(), "archive cleared");
            println!("Archive cleared");
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
