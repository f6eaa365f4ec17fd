//! fzr - interactive fuzzy file finder.
//!
//! Walks a base path, loads the names into the search engine and runs the
//! raw-mode picker. The accepted candidate's absolute path is printed to
//! stdout so the output can be substituted into shell commands; everything
//! interactive is drawn on stderr.

mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fzr_core::{CandidateStore, Limits, WalkMode, collect_names};

const BASE_PATH_ENV: &str = "FZR_BASE_PATH";
const MAX_ENV_BASE_PATHS: usize = 4;

#[derive(Debug, Parser)]
#[command(name = "fzr", version, about = "Fuzzy file finder")]
struct Cli {
    /// Search directory names instead of file names
    #[arg(short = 'd', long = "directories")]
    directories: bool,

    /// Pin the base path to the first usable FZR_BASE_PATH entry, regardless
    /// of the working directory
    #[arg(short = 'e', long = "env-base")]
    env_base: bool,
}

/// Where the base path came from, shown in the picker's title row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseSource {
    WorkingDir,
    Env,
}

impl BaseSource {
    fn label(self) -> &'static str {
        match self {
            BaseSource::WorkingDir => "cwd",
            BaseSource::Env => "env",
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help, usage and flag errors all exit non-zero
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let _log_guard = init_logging();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("fzr: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let (base_path, source) = resolve_base_path(cli.env_base)?;
    let mode = if cli.directories {
        WalkMode::Directories
    } else {
        WalkMode::Files
    };

    tracing::info!(base_path = %base_path.display(), ?mode, "starting scan");
    let names = collect_names(&base_path, mode)?;

    let mut store = CandidateStore::new(Limits::default())?;
    store.load(names)?;

    match tui::run(&mut store, &base_path, source.label())? {
        Some(name) => {
            println!("{}", base_path.join(name).display());
            Ok(0)
        }
        None => Ok(0),
    }
}

/// Resolve the base path the candidate pool is built from.
///
/// `FZR_BASE_PATH` holds a colon-separated list of up to four base paths.
/// Without `-e` the first entry that is an ancestor of the working directory
/// wins, so the finder automatically widens to a configured project root
/// while inside it; otherwise the working directory is used as-is.
fn resolve_base_path(env_pinned: bool) -> anyhow::Result<(PathBuf, BaseSource)> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    let Some(raw) = std::env::var_os(BASE_PATH_ENV) else {
        return Ok((cwd, BaseSource::WorkingDir));
    };
    let raw = raw.to_string_lossy().into_owned();
    let entries: Vec<PathBuf> = raw
        .split(':')
        .filter(|part| !part.is_empty())
        .take(MAX_ENV_BASE_PATHS)
        .map(PathBuf::from)
        .collect();

    if env_pinned {
        for entry in &entries {
            if let Ok(canonical) = entry.canonicalize() {
                return Ok((canonical, BaseSource::Env));
            }
        }
        anyhow::bail!("no usable base path in {BASE_PATH_ENV}={raw}");
    }

    for entry in &entries {
        if let Ok(canonical) = entry.canonicalize()
            && cwd.starts_with(&canonical)
        {
            return Ok((canonical, BaseSource::Env));
        }
    }

    Ok((cwd, BaseSource::WorkingDir))
}

/// File logging, enabled by `FZR_LOG` (an `EnvFilter` directive). The picker
/// owns the terminal, so logs go to `fzr.log` in the temp directory.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = std::env::var("FZR_LOG").ok()?;

    let appender = tracing_appender::rolling::never(std::env::temp_dir(), "fzr.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
