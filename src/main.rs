//! BrainCache - a quick-memo terminal note editor.
//!
//! # Usage
//!
//! ```bash
//! braincache
//! braincache --title "Groceries" ~/notes/groceries.md
//! braincache --no-presence --save
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use braincache::app::App;
use braincache::config::{
    ConfigFlags, clear_config_flags, default_presence_path, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use braincache::perf;
use braincache::presence::{DEFAULT_TITLE, FilePresence, PresenceManager};
use braincache::storage::default_note_path;

/// A quick-memo terminal note editor with markdown list continuation
#[derive(Parser, Debug)]
#[command(name = "braincache", version, about, long_about = None)]
struct Cli {
    /// Note file to edit (defaults to note.md in the data directory)
    #[arg(value_name = "NOTE")]
    note: Option<PathBuf>,

    /// Title shown by the presence activity
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Do not start presence activities
    #[arg(long)]
    no_presence: bool,

    /// Where the presence activity record is written
    #[arg(long, value_name = "PATH")]
    presence_file: Option<PathBuf>,

    /// Write detailed editor debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Write tracing output to a file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Send tracing output to `log_file`, or nowhere: the terminal belongs to the UI.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::sink).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(effective.log_file.as_ref())?;

    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("BRAINCACHE_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let note_path = cli.note.clone().unwrap_or_else(default_note_path);
    let title = effective
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    tracing::info!(note = %note_path.display(), %title, "starting braincache");

    let mut app = App::new(note_path)
        .with_title(title)
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );
    if !effective.no_presence {
        let presence_path = effective
            .presence_file
            .clone()
            .unwrap_or_else(default_presence_path);
        app = app.with_presence(PresenceManager::new(Box::new(FilePresence::new(
            presence_path,
        ))));
    }

    app.run().context("Application error")
}
