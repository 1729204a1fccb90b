//! Marquee host binary.
//!
//! Reads one command per line on stdin (see [`marquee::runtime::command`]),
//! writes one JSON frame or notice per line on stdout and logs to stderr.
//!
//! ```text
//! marquee [--config marquee.toml] [catalog.json]
//! ```

use marquee::catalog::ItemRegistry;
use marquee::observability::init_tracing;
use marquee::runtime::{parse_command, EventSender, JsonLinesSink, Runtime};
use marquee::storage::{JsonPreferences, MemoryPreferences, PreferenceStore, Preferences};
use marquee::{initialize, Config, Event, MarqueeError, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "usage: marquee [--config <file.toml>] [catalog.json]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "-c" | "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| MarqueeError::Config(format!("{arg} needs a path")))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => {
                    return Err(MarqueeError::Config(format!("unknown option {flag}")));
                }
                _ if parsed.catalog.is_none() => parsed.catalog = Some(PathBuf::from(arg)),
                _ => return Err(MarqueeError::Config(format!("unexpected argument {arg}"))),
            }
        }
        Ok(Some(parsed))
    }
}

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("marquee: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run());
    // The stdin reader may still be parked on a blocking read.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("marquee: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let Some(args) = Args::parse(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .with_env();
    init_tracing(&config);

    let catalog_path = args
        .catalog
        .or_else(|| config.catalog_path())
        .ok_or_else(|| MarqueeError::Config(format!("no catalog given\n{USAGE}")))?;
    let registry = ItemRegistry::load(&catalog_path)?;

    let store = open_preferences(&config);
    let prefs = store.load()?;
    let pipeline = Arc::new(config.build_pipeline()?);
    let state = initialize(&config, registry, prefs);

    let sink = JsonLinesSink::new(std::io::stdout());
    let mut runtime = Runtime::new(state, pipeline, store, Box::new(sink));
    tokio::spawn(read_commands(runtime.sender()));

    runtime.render();
    runtime.dispatch(Event::AutoSelect);
    runtime.run().await;

    tracing::info!("marquee stopped");
    Ok(())
}

/// Opens the preferences file, falling back to an unsaved session if it cannot
/// be accessed. A corrupt file is reset and rewritten on the next change.
fn open_preferences(config: &Config) -> Box<dyn PreferenceStore> {
    let path = config.preferences_path();
    match JsonPreferences::open_or_reset(path.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "preferences unavailable, changes will not be saved"
            );
            Box::new(MemoryPreferences::new(&Preferences::default()))
        }
    }
}

async fn read_commands(sender: EventSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command(&line) {
                Ok(Some(event)) => {
                    if !sender.send(event) {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "ignoring command"),
            },
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        }
    }
    let _ = sender.send(Event::Quit);
}
