//! scopelog CLI: emits log lines to stderr from the command line.

use std::thread;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use scopelog::{LineOptions, LogLine, Severity};

#[derive(Parser)]
#[command(
    name = "scopelog",
    about = "Write scoped log lines to stderr",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one line built from the given words
    Emit {
        /// Words of the message, joined with single spaces
        message: Vec<String>,
        /// Severity label: info, warn or error
        #[arg(long, short, default_value = "error")]
        level: Severity,
        /// Omit the `[YYYY-MM-DD HH:MM:SS] ` prefix
        #[arg(long)]
        no_time: bool,
        /// Do not take the process-wide line lock
        #[arg(long)]
        no_lock: bool,
        /// Emit the line once from each of N threads
        #[arg(long, short, default_value_t = 1)]
        threads: usize,
    },
    /// Print the sample lines
    Demo {
        /// Omit timestamps on every line
        #[arg(long)]
        no_time: bool,
    },
}

fn main() -> Result<()> {
    // Diagnostics go to stdout so they never mix with the emitted lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Emit {
            message,
            level,
            no_time,
            no_lock,
            threads,
        } => {
            let options = LineOptions::new(level)
                .with_timestamp(!no_time)
                .with_locking(!no_lock);
            cmd_emit(options, message.join(" "), threads)?;
        }
        Commands::Demo { no_time } => {
            cmd_demo(!no_time);
        }
    }

    Ok(())
}

// ─── Command implementations ──────────────────────────────────────────────────

fn cmd_emit(options: LineOptions, message: String, threads: usize) -> Result<()> {
    debug!(?options, threads, "emitting");

    if threads <= 1 {
        LogLine::with_options(options).append(&message);
        return Ok(());
    }

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let message = message.clone();
            thread::spawn(move || {
                LogLine::with_options(options).append(message);
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("logging thread panicked"))?;
    }

    Ok(())
}

fn cmd_demo(timestamp: bool) {
    let the_answer = 42;

    LogLine::new(Severity::Info, timestamp).append("I am a logger, logging stuff");
    LogLine::new(Severity::Info, timestamp)
        .append("The answer to life, universe and everything is ")
        .append(the_answer);
    LogLine::new(Severity::Error, false).append("Something fatal happened");
}
