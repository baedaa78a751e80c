//! Floatpanel - Entry Point

use clap::Parser;
use floatpanel::config::ResolvedConfig;
use floatpanel::model::{AppError, TraceError, Viewport};
use floatpanel::replay::{process_lines, ReplayHost, ReplayReport, TraceEvent};
use floatpanel::store::{FileStorage, KeyValueStorage, LayoutSettingsStore, MemoryStorage};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{info, warn};

/// Floatpanel - replay pointer traces through the floating panel engine
#[derive(Parser, Debug)]
#[command(name = "floatpanel")]
#[command(version)]
#[command(about = "Replay pointer traces through the floating panel interaction engine")]
pub struct Args {
    /// Path to JSONL pointer trace (reads from stdin if not provided)
    pub trace: Option<PathBuf>,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    pub viewport: Viewport,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for persisted layout records
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Keep layout in memory instead of persisting it
    #[arg(long)]
    pub memory: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse `WIDTHxHEIGHT` into a viewport.
fn parse_viewport(raw: &str) -> Result<Viewport, String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", raw))?;
    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height))?;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(format!("viewport must be positive, got '{}'", raw));
    }
    Ok(Viewport::new(width, height))
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = floatpanel::config::load_config_with_precedence(args.config.clone())?;
        let merged = floatpanel::config::merge_config(config_file);
        let with_env = floatpanel::config::apply_env_overrides(merged);
        floatpanel::config::apply_cli_overrides(with_env, args.storage_dir.clone())
    };

    floatpanel::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let lines = read_trace(args.trace.as_ref())?;
    let (events, errors) = process_lines(&lines, 1);
    for err in &errors {
        warn!(error = %err, "Skipping malformed trace line");
        eprintln!("{}", err);
    }

    let report = if args.memory {
        replay(MemoryStorage::new(), &config, args.viewport, events)
    } else {
        replay(
            FileStorage::new(&config.storage_dir),
            &config,
            args.viewport,
            events,
        )
    };

    if args.json {
        let encoded = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        println!("{}", encoded);
    } else {
        println!("{}", report);
        if !errors.is_empty() {
            println!("skipped:     {} malformed line(s)", errors.len());
        }
    }

    Ok(())
}

fn read_trace(path: Option<&PathBuf>) -> Result<Vec<String>, AppError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(TraceError::FileNotFound { path: path.clone() }.into());
            }
            let file = std::fs::File::open(path)?;
            Ok(std::io::BufReader::new(file)
                .lines()
                .collect::<Result<Vec<_>, _>>()?)
        }
        None => Ok(std::io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()?),
    }
}

fn replay<S: KeyValueStorage>(
    storage: S,
    config: &ResolvedConfig,
    viewport: Viewport,
    events: Vec<TraceEvent>,
) -> ReplayReport {
    let store = LayoutSettingsStore::with_options(
        storage,
        config.storage_key.clone(),
        config.bounds,
        config.defaults,
    );
    let mut host = ReplayHost::new(store, viewport, config.options);
    host.apply_all(events);
    host.finish()
}
