// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! keyshell — interactive command shell with keyword tab-completion.
//!
//! Provides a readline-based interactive shell with:
//! - Tab completion from `autocomplete` keyword files
//! - Multiline input (backslash continuation)
//! - Meta-commands for inspecting the loaded keywords
//! - Persistent command history

mod completer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use colored::Colorize;
use keyshell_complete::{CompletionConfig, KeywordCompleter, LoadReport};
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::MatchingBracketValidator;
use rustyline_derive::{Completer, Helper, Highlighter, Hinter, Validator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use completer::ShellCompleter;

/// keyshell version string, pulled from Cargo.toml at compile time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Terminal width assumed when laying out keyword listings.
const LISTING_WIDTH: usize = 80;

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// keyshell — interactive shell with keyword completion.
#[derive(Parser, Debug)]
#[command(name = "keyshell", version = VERSION, about = "Interactive shell with keyword tab-completion")]
struct Cli {
    /// JSON file with completion settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra directory searched for keyword files (repeatable).
    #[arg(long = "search-path", value_name = "DIR")]
    search_path: Vec<PathBuf>,

    /// Directory holding the highest-priority keyword file.
    #[arg(long, value_name = "DIR")]
    working_dir: Option<PathBuf>,

    /// Do not load the bundled keyword list.
    #[arg(long)]
    no_bundled: bool,

    /// Log loader activity at debug level (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults (or the config file), then `KEYSHELL_PATH`, then flags.
    fn completion_config(&self) -> anyhow::Result<CompletionConfig> {
        let mut config = match &self.config {
            Some(path) => CompletionConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CompletionConfig::default(),
        };
        config.extend_from_env();
        config.search_path.extend(self.search_path.iter().cloned());
        if let Some(dir) = &self.working_dir {
            config.working_dir = Some(dir.clone());
        }
        if self.no_bundled {
            config.include_bundled = false;
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Rustyline helper (bundles all traits into one type)
// ---------------------------------------------------------------------------

/// Combined helper that provides completion, hinting, and bracket
/// validation for the rustyline editor.
#[derive(Helper, Highlighter, Completer, Hinter, Validator)]
struct ShellHelper {
    #[rustyline(Completer)]
    completer: ShellCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
}

// ---------------------------------------------------------------------------
// REPL session state
// ---------------------------------------------------------------------------

/// State shared between the prompt loop and meta-commands.
struct Session {
    /// Loaded keywords, also held by the completer.
    keywords: Arc<KeywordCompleter>,
    /// What the keyword load did, for `\sources`.
    report: LoadReport,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.completion_config()?;
    let (keywords, report) = KeywordCompleter::from_config(&config);
    info!(
        keywords = keywords.candidates().len(),
        sources = report.sources_read.len(),
        skipped = report.sources_skipped,
        rejected = report.rejected,
        aborted = report.aborted,
        "Keywords loaded"
    );

    let session = Session {
        keywords: Arc::new(keywords),
        report,
    };

    print_banner(&session);

    let helper = ShellHelper {
        completer: ShellCompleter::new(Arc::clone(&session.keywords)),
        hinter: HistoryHinter::new(),
        validator: MatchingBracketValidator::new(),
    };

    let mut editor = rustyline::Editor::<ShellHelper, DefaultHistory>::new()
        .context("failed to create readline editor")?;
    editor.set_helper(Some(helper));
    editor.set_auto_add_history(true);

    // Missing history on first run is fine.
    let history_path = history_file_path();
    let _ = editor.load_history(&history_path);

    let mut statement_buf = String::new();

    loop {
        let prompt = if statement_buf.is_empty() {
            format!("{} ", "keyshell>".bright_green().bold())
        } else {
            format!("{} ", "       ..".bright_green())
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                // Empty line: if we have a buffer, treat it as end of input.
                if trimmed.is_empty() {
                    if !statement_buf.is_empty() {
                        let statement = std::mem::take(&mut statement_buf);
                        submit_statement(statement.trim());
                    }
                    continue;
                }

                // Trailing '\' continues the statement on the next line.
                if let Some(without_continuation) = trimmed.strip_suffix('\\') {
                    if !statement_buf.is_empty() {
                        statement_buf.push(' ');
                    }
                    statement_buf.push_str(without_continuation);
                    continue;
                }

                if !statement_buf.is_empty() {
                    statement_buf.push(' ');
                    statement_buf.push_str(trimmed);
                    let statement = std::mem::take(&mut statement_buf);
                    submit_statement(statement.trim());
                    continue;
                }

                if trimmed.starts_with('\\') {
                    if handle_meta_command(&session, trimmed) {
                        break;
                    }
                    continue;
                }

                submit_statement(trimmed);
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: clear the current buffer.
                if !statement_buf.is_empty() {
                    statement_buf.clear();
                    println!("Statement cancelled.");
                } else {
                    println!("Use \\quit or Ctrl-D to exit.");
                }
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye.");
                break;
            }
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }

    let _ = editor.save_history(&history_path);
    Ok(())
}

/// Log to stderr, honouring `RUST_LOG` and otherwise staying quiet unless
/// `--verbose` was given.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Hand a complete statement to the shell. keyshell has no interpreter of
/// its own, so the statement is echoed back.
fn submit_statement(statement: &str) {
    if statement.is_empty() {
        return;
    }
    println!("{} {}", "=>".dimmed(), statement);
}

// ---------------------------------------------------------------------------
// Meta-command handling
// ---------------------------------------------------------------------------

/// Handle a meta-command (line starting with '\').
///
/// Returns `true` if the REPL should exit (on \quit or \q).
fn handle_meta_command(session: &Session, line: &str) -> bool {
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or("");

    match cmd {
        "\\quit" | "\\q" => {
            println!("Goodbye.");
            return true;
        }
        "\\help" | "\\h" | "\\?" => {
            print_help();
        }
        "\\keywords" => {
            let candidates = session.keywords.candidates();
            let listed: Vec<&str> = candidates.with_prefix(arg).collect();
            if listed.is_empty() {
                println!("No keywords match {arg:?}.");
            } else {
                print!("{}", format_columns(&listed, LISTING_WIDTH));
                println!("{}", format!("{} keyword(s)", listed.len()).dimmed());
            }
        }
        "\\sources" => {
            print_sources(&session.report);
        }
        _ => {
            eprintln!(
                "{} Unknown command: {}. Type \\help for available commands.",
                "Error:".red().bold(),
                cmd
            );
        }
    }

    false
}

fn print_sources(report: &LoadReport) {
    if report.sources_read.is_empty() {
        println!("No keyword sources were loaded.");
    }
    for name in &report.sources_read {
        println!("  {}", name.bright_cyan());
    }
    println!(
        "{}",
        format!(
            "{} added, {} duplicate, {} rejected, {} source(s) skipped",
            report.added, report.duplicates, report.rejected, report.sources_skipped
        )
        .dimmed()
    );
    if report.aborted {
        println!(
            "{} loading stopped early after a read error",
            "Warning:".yellow().bold()
        );
    }
}

/// Lay words out in left-aligned columns no wider than `width` in total.
fn format_columns(words: &[&str], width: usize) -> String {
    let column = words.iter().map(|w| w.chars().count()).max().unwrap_or(0) + 2;
    let per_row = (width / column).max(1);

    let mut out = String::new();
    for row in words.chunks(per_row) {
        let line: String = row.iter().map(|w| format!("{w:<column$}")).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// History file path
// ---------------------------------------------------------------------------

/// Determine the history file path (~/.keyshell_history).
fn history_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".keyshell_history")
}

// ---------------------------------------------------------------------------
// Help and banner
// ---------------------------------------------------------------------------

fn print_banner(session: &Session) {
    println!();
    println!("{}", "  keyshell".bright_cyan().bold());
    println!("  {} {}", "Version: ".dimmed(), VERSION);
    println!(
        "  {} {}",
        "Keywords:".dimmed(),
        session.keywords.candidates().len()
    );
    println!();
    println!(
        "  Type {} for help, {} to exit. Press Tab to complete.",
        "\\help".bright_yellow(),
        "\\quit".bright_yellow()
    );
    println!();
}

fn print_help() {
    println!();
    println!("{}", "  Meta-Commands".bright_cyan().bold());
    println!();
    println!(
        "  {}  Show loaded keywords, optionally only those starting with prefix",
        "\\keywords [prefix]".bright_yellow()
    );
    println!(
        "  {}  Show the keyword files that were loaded",
        "\\sources          ".bright_yellow()
    );
    println!(
        "  {}  Show this help message",
        "\\help             ".bright_yellow()
    );
    println!(
        "  {}  Exit the shell",
        "\\quit / \\q        ".bright_yellow()
    );
    println!();
    println!("{}", "  Input".bright_cyan().bold());
    println!();
    println!("  Press Tab to complete the word before the cursor.");
    println!("  Use \\ at end of line for multiline continuation.");
    println!();
}
