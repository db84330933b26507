//! Headless dashboard shell: builds the application context once, then reads
//! commands and key combinations from stdin and routes them through the
//! shortcut dispatcher and the error boundary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::{
    keyboard::Event, load_settings, load_settings_from, AppContext, BoundaryView, Debounced,
    HandlerGuard, KeyCombo, KeyboardEvent, ReportedError,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./dashboard.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

enum Command {
    OpenModal,
    CloseModal,
    Report(ReportedError),
    Login,
    Retry,
    Search(String),
    Quit,
    Key(KeyCombo),
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let command = match (head, rest.trim()) {
        ("modal", "open") => Command::OpenModal,
        ("modal", "close") => Command::CloseModal,
        ("report", "unauthenticated") => Command::Report(ReportedError::Unauthenticated),
        ("report", message) => Command::Report(ReportedError::message(message)),
        ("login", "") => Command::Login,
        ("retry", "") => Command::Retry,
        ("search", text) => Command::Search(text.to_string()),
        ("quit", "") => Command::Quit,
        _ => Command::Key(line.parse()?),
    };
    Ok(command)
}

struct ConfirmModal {
    _save: HandlerGuard<KeyboardEvent>,
    _cancel: HandlerGuard<KeyboardEvent>,
}

impl ConfirmModal {
    fn open(ctx: &AppContext) -> Self {
        Self {
            _save: ctx.save.push_scoped(|_| info!("modal confirmed")),
            _cancel: ctx.cancel.push_scoped(|_| info!("modal dismissed")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path, |name| std::env::var(name).ok())?,
        None => load_settings()?,
    };
    info!(api = %settings.api_base_url, "starting dashboard shell");

    let ctx = AppContext::new(settings)?;
    let boundary = ctx.install_boundary();
    let search = Debounced::new(String::new(), ctx.settings.search_debounce());
    let _form = ctx.save.push_scoped(|_| info!("dinner form saved"));
    let mut modal: Option<ConfirmModal> = None;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("? {err}");
                continue;
            }
        };

        match command {
            Command::OpenModal => modal = Some(ConfirmModal::open(&ctx)),
            Command::CloseModal => modal = None,
            Command::Report(err) => ctx.errors.report(err),
            Command::Login => {
                if boundary.complete_login() {
                    println!("logged in");
                }
            }
            Command::Retry => {
                boundary.retry();
            }
            Command::Search(text) => {
                search.set(text);
                println!(
                    "search: current={:?} debounced={:?}",
                    search.current(),
                    search.debounced()
                );
            }
            Command::Quit => break,
            Command::Key(combo) => {
                let mut event = combo.key_down_event();
                ctx.dispatch_key(&mut event);
                let outcome = if event.default_prevented() {
                    "handled"
                } else {
                    "default action"
                };
                println!("{combo}: {outcome}");
            }
        }

        match boundary.view() {
            BoundaryView::Healthy => {}
            BoundaryView::Login => println!("[login required]"),
            BoundaryView::Crashed(message) => println!("[error] {message} (type `retry`)"),
        }
    }

    drop(modal);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shell_commands() {
        assert!(matches!(parse_command("modal open"), Ok(Command::OpenModal)));
        assert!(matches!(
            parse_command("report unauthenticated"),
            Ok(Command::Report(ReportedError::Unauthenticated))
        ));
        assert!(matches!(
            parse_command("report server on fire"),
            Ok(Command::Report(ReportedError::Message(m))) if m == "server on fire"
        ));
        assert!(matches!(
            parse_command("search pasta al forno"),
            Ok(Command::Search(text)) if text == "pasta al forno"
        ));
    }

    #[test]
    fn anything_else_is_a_key_combo() {
        match parse_command("ctrl+s") {
            Ok(Command::Key(combo)) => assert_eq!(combo, KeyCombo::ctrl_s()),
            _ => panic!("expected key combo"),
        }
        assert!(parse_command("hyper+s").is_err());
    }
}
