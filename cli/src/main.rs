//! Aula CLI - Binary entry point and line-oriented session driver.
//!
//! # Architecture
//!
//! The CLI loads [`aula_config::AulaConfig`], seeds an [`aula_engine::Session`]
//! and feeds it one parsed [`Command`] per input line.
//!
//! ```text
//! main() -> AulaConfig::load() -> Seed -> Session::new() -> run()
//!                                                            |
//!                                                            v
//!                                       Command::parse -> Session::dispatch -> render
//! ```
//!
//! Logs go to a file, never to stdout, so they cannot interleave with rendered output.

mod render;

use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use aula_config::AulaConfig;
use aula_engine::{Command, DispatchOutcome, Identity, Role, Seed, Session, command_help};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_aula_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than mixing logs into the screen.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_aula_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in aula_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn aula_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.aula/logs/aula.log
    if let Some(config_path) = AulaConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("aula.log"));
    }

    // Fallback: ./.aula/logs/aula.log
    candidates.push(PathBuf::from(".aula").join("logs").join("aula.log"));

    candidates
}

fn main() -> Result<()> {
    init_tracing();

    let config = AulaConfig::load()
        .context("loading config")?
        .unwrap_or_default();

    let seed = match config.seed_path() {
        Some(path) => {
            Seed::load(&path).with_context(|| format!("loading seed {}", path.display()))?
        }
        None => Seed::demo(),
    };

    let session = Session::new(
        seed,
        config.identity(),
        config.sync_settings(),
        config.navigation_settings(),
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(session, stdin.lock(), stdout.lock())
}

/// Drive `session` from `input` until EOF or `quit`, printing to `output`.
fn run(mut session: Session, input: impl BufRead, mut output: impl Write) -> Result<()> {
    writeln!(output, "{}", render::screen(&session))?;

    for line in input.lines() {
        let line = line?;
        let command = Command::parse(&line);

        match command {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Help => {
                write!(output, "{}", command_help())?;
                continue;
            }
            Command::Usage(spec) => {
                writeln!(output, "usage: {}", spec.usage)?;
                continue;
            }
            Command::Unknown(name) => {
                writeln!(output, "unknown command: {name} (try help)")?;
                continue;
            }
            Command::Role(role) => {
                let identity = match role {
                    Role::Student => {
                        Identity::student(session.sync_settings().primary_student().clone())
                    }
                    Role::Professor => Identity::professor(),
                };
                session.set_identity(identity);
            }
            _ => {
                if let Some(action) = command.action()
                    && let DispatchOutcome::Rejected(err) = session.dispatch(action)
                {
                    writeln!(output, "error: {err}")?;
                }
            }
        }

        writeln!(output, "{}", render::screen(&session))?;
    }

    output.flush()?;
    Ok(())
}
