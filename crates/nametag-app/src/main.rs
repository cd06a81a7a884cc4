// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nametag — desktop front end.
//
// Entry point. Loads `.env`, initialises logging, opens the session, and runs
// one subcommand. The desktop "camera" is an image file given to `scan`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use nametag_app::services::data_dir;
use nametag_app::{ScanOutcome, Session};
use nametag_bridge::PlatformBridge;
use nametag_bridge::stub::StubBridge;
use nametag_core::AppConfig;
use nametag_core::human_errors::{Notification, Severity, humanize_error};
use nametag_storage::SettingsStore;
use tokio::io::AsyncReadExt;

#[derive(Debug, Parser)]
#[command(name = "nametag", version, about = "Scan name badges into an attendee list")]
struct Cli {
    /// Directory holding settings.db and the exported CSV.
    #[arg(long, global = true, env = "NAMETAG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a name off a badge photo.
    Scan {
        image: PathBuf,
        /// Add the recognised name without asking.
        #[arg(long)]
        add: bool,
    },
    /// Add a name by hand.
    Add { name: String },
    /// Print the attendee list.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Replace the list with the lines read from stdin.
    Edit,
    /// Empty the list.
    Clear {
        /// Required: the list cannot be recovered.
        #[arg(long)]
        yes: bool,
    },
    /// Send the list as CSV through the platform's mail or share sheet.
    Export,
    /// Show or change the destination email and OCR API key.
    Settings {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Forget all stored settings and names.
    Reset,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("Nametag starting");

    let dir = match cli.data_dir.clone() {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => dir,
            Err(e) => return fail(&humanize_error(&e.into())),
        },
        None => match data_dir::data_dir() {
            Ok(dir) => dir,
            Err(e) => return fail(&humanize_error(&e)),
        },
    };

    let bridge: Arc<dyn PlatformBridge> = match &cli.command {
        Command::Scan { image, .. } => Arc::new(StubBridge::with_still_image(image)),
        _ => nametag_bridge::platform_bridge(),
    };

    let store = Arc::new(SettingsStore::open(dir.join("settings.db")));
    let mut session = match Session::open(AppConfig::from_env(), store, bridge, &dir) {
        Ok(session) => session,
        Err(e) => return fail(&humanize_error(&e)),
    };

    run(cli.command, &mut session).await
}

async fn run(command: Command, session: &mut Session) -> ExitCode {
    match command {
        Command::Scan { add, .. } => match session.scan().await {
            ScanOutcome::Candidate(name) => {
                println!("{name}");
                if add && session.confirm_candidate(&name) {
                    report(&Notification::info(format!("Added {name}.")));
                }
            }
            outcome => {
                if let Some(note) = outcome.notification() {
                    report(&note);
                }
            }
        },

        Command::Add { name } => {
            if !session.confirm_candidate(&name) {
                report(&Notification::warning(
                    "Nothing to add.",
                    "Type a name first.",
                ));
            }
        }

        Command::List { json } => {
            let names = session.names().snapshot();
            if json {
                match serde_json::to_string_pretty(&names) {
                    Ok(out) => println!("{out}"),
                    Err(e) => report(&humanize_error(&e.into())),
                }
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }

        Command::Edit => {
            let mut text = String::new();
            if let Err(e) = tokio::io::stdin().read_to_string(&mut text).await {
                report(&humanize_error(&e.into()));
                return ExitCode::SUCCESS;
            }
            session.names().replace_from_text(&text);
            report(&Notification::info(format!(
                "List now has {} names.",
                session.names().len()
            )));
        }

        Command::Clear { yes } => {
            if !yes {
                eprintln!("refusing to clear the list without --yes");
                return ExitCode::from(2);
            }
            session.clear_names();
            report(&Notification::info("List cleared."));
        }

        Command::Export => {
            report(&session.export_now().await);
            tracing::debug!(path = %session.export_path().display(), "export path");
        }

        Command::Settings { email, api_key } => {
            if let Some(email) = email {
                session.set_email(email);
            }
            if let Some(key) = api_key {
                session.set_ocr_api_key(key);
            }
            let settings = session.settings();
            println!("email:   {}", settings.email);
            println!("api key: {}", mask(&settings.ocr_api_key));
        }

        Command::Reset => {
            session.reset();
            report(&Notification::info("All stored settings and names removed."));
        }
    }
    ExitCode::SUCCESS
}

fn report(note: &Notification) {
    match note.severity {
        Severity::Info => println!("{note}"),
        Severity::Warning | Severity::Error => eprintln!("{note}"),
    }
}

fn fail(note: &Notification) -> ExitCode {
    report(note);
    ExitCode::FAILURE
}

fn mask(key: &str) -> String {
    match key.char_indices().nth_back(3) {
        Some((i, _)) if i > 0 => format!("{}{}", "*".repeat(key[..i].chars().count()), &key[i..]),
        _ if key.is_empty() => "(not set)".into(),
        _ => "*".repeat(key.chars().count()),
    }
}
