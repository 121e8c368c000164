// mapctl - interactive column-to-value mapping editor
//
// Builds a list of (column, value, note) mappings for a tabular data source.
// Picking a column looks up that column's distinct values from the analytics
// backend so the value can be chosen instead of typed.
//
// Architecture:
// - Editor: draft state, committed list, request tokens for lookups
// - Lookup: suggestion sources (HTTP backend, demo) and value labelling
// - TUI (ratatui): mappings list, popover, logs panel
// - Config: ~/.config/mapctl/config.toml with env overrides

mod cli;
mod config;
mod demo;
mod editor;
mod logging;
mod lookup;
mod mapping_file;
mod model;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use config::{Config, LogRotation, LoggingConfig};
use editor::MappingEditor;
use logging::{LogBuffer, TuiLogLayer};
use lookup::{fetch_suggestions, FetchOutcome, HttpValueSource, SuggestionSource, SuggestionValue};
use model::{DataSource, Mapping};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(cli.run)) {
        Commands::Config {
            show,
            reset,
            edit,
            path,
        } => {
            cli::handle_config(show, reset, edit, path);
            Ok(())
        }
        Commands::Lookup { column, demo, json } => {
            let config = load_config();
            let log_buffer = LogBuffer::new();
            let _file_guard = init_logging(&config, &log_buffer, false);
            run_lookup(&config, &column, demo || config.demo_mode, json).await
        }
        Commands::Run(args) => {
            let config = load_config();
            let log_buffer = LogBuffer::new();
            let _file_guard = init_logging(&config, &log_buffer, config.enable_tui);
            run_editor(&config, args, log_buffer).await
        }
    }
}

fn load_config() -> Config {
    // Write the template on first run so users can discover the options
    Config::ensure_config_exists();
    Config::from_env()
}

/// Initialize tracing
///
/// TUI mode captures logs into the buffer (stderr would garble the screen);
/// otherwise logs go to stderr so stdout stays clean for mapping output.
/// File logging adds a JSON layer on a rolling, non-blocking writer.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(config: &Config, log_buffer: &LogBuffer, use_tui: bool) -> Option<WorkerGuard> {
    let default_filter = format!("mapctl={},reqwest=warn", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (writer, guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });
    let tui_layer = use_tui.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!use_tui).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling file writer, if file logging is enabled and the directory is usable
///
/// The guard must be kept alive for the duration of the program to flush logs.
fn file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}

/// Pick the data source and where its values come from
fn value_source(config: &Config, demo: bool) -> Result<(DataSource, Arc<dyn SuggestionSource>)> {
    if demo {
        tracing::info!("Running in DEMO MODE - canned values, no backend");
        let source: Arc<dyn SuggestionSource> = Arc::new(demo::DemoValueSource::new());
        return Ok((demo::demo_data_source(), source));
    }

    let source: Arc<dyn SuggestionSource> = Arc::new(
        HttpValueSource::new(&config.backend_url, config.request_timeout())
            .with_context(|| format!("Invalid backend URL {:?}", config.backend_url))?,
    );
    Ok((config.datasource.to_data_source(), source))
}

/// `mapctl run`: edit mappings in the TUI, then emit the final list
async fn run_editor(config: &Config, args: RunArgs, log_buffer: LogBuffer) -> Result<()> {
    if !config.enable_tui {
        anyhow::bail!(
            "Interactive editing needs the TUI (MAPCTL_NO_TUI is set); use `mapctl lookup` for headless lookups"
        );
    }

    let initial = mapping_file::read_mappings(args.mappings.as_deref())?;
    let (data_source, source) = value_source(config, args.demo || config.demo_mode)?;

    tracing::info!(
        "Editing {} mapping(s) for '{}' (source: {})",
        initial.len(),
        data_source.name,
        source.name()
    );

    // The parent form's value; the editor reports every change here
    let form_value = Arc::new(Mutex::new(initial.clone()));
    let sink = Arc::clone(&form_value);
    let on_change = Box::new(move |mappings: &[Mapping]| {
        tracing::debug!("Form value now holds {} mapping(s)", mappings.len());
        if let Ok(mut value) = sink.lock() {
            *value = mappings.to_vec();
        }
    });

    let (settled_tx, settled_rx) = mpsc::unbounded_channel();
    let editor = MappingEditor::new(data_source, source, initial, settled_tx, on_change);

    let tui_result = tui::run_tui(editor, settled_rx, log_buffer).await;
    if let Err(ref e) = tui_result {
        tracing::error!("TUI error: {:?}", e);
    }

    // Emit whatever was committed, even if the TUI failed
    let mappings = form_value
        .lock()
        .map(|value| value.clone())
        .map_err(|_| anyhow::anyhow!("Mapping state was poisoned"))?;
    mapping_file::write_mappings(&mappings, args.output.as_deref())?;

    tracing::info!("Shutdown complete");
    tui_result
}

/// `mapctl lookup`: one lookup, printed to stdout
async fn run_lookup(config: &Config, column: &str, demo: bool, json: bool) -> Result<()> {
    let (data_source, source) = value_source(config, demo)?;

    if !data_source.columns.iter().any(|c| c == column) {
        tracing::warn!(
            "'{}' is not a configured column of '{}'; looking it up anyway",
            column,
            data_source.name
        );
    }

    // Ctrl+C abandons the request
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    match fetch_suggestions(source.as_ref(), &data_source, column, &cancel).await {
        FetchOutcome::Cancelled => tracing::info!("Lookup interrupted"),
        FetchOutcome::Loaded(suggestions) if json => {
            let values: Vec<&SuggestionValue> = suggestions.iter().map(|s| &s.value).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&values).context("Failed to serialize values")?
            );
        }
        FetchOutcome::Loaded(suggestions) => {
            for suggestion in &suggestions {
                println!("{}", suggestion.label);
            }
        }
    }

    Ok(())
}
