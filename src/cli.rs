// CLI module - command-line argument parsing and config handlers
//
// Subcommands:
// - run (default): interactive mapping editor
// - lookup <COLUMN>: one headless value lookup
// - config --show|--reset|--edit|--path: configuration management

use crate::config::{Config, VERSION};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// mapctl - map data source columns to values
#[derive(Parser, Debug)]
#[command(name = "mapctl")]
#[command(version = VERSION)]
#[command(about = "Interactive column-to-value mapping editor", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the default `run` command
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit mappings in the TUI (default)
    Run(RunArgs),

    /// Fetch the distinct values of one column and print them
    Lookup {
        /// Column to look up
        column: String,

        /// Use the built-in demo data source
        #[arg(long)]
        demo: bool,

        /// Print raw values as a JSON array instead of labels
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// JSON array of initial mappings
    #[arg(long, value_name = "FILE")]
    pub mappings: Option<PathBuf>,

    /// Write the final mappings here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Use the built-in demo data source
    #[arg(long)]
    pub demo: bool,
}

/// Handle `mapctl config`. Exits the process on failure.
pub fn handle_config(show: bool, reset: bool, edit: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else if edit {
        handle_config_edit();
    } else {
        println!("Usage: mapctl config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!("# Runtime: tui = {}, demo = {}", config.enable_tui, config.demo_mode);
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_runs_editor() {
        let cli = Cli::parse_from(["mapctl", "--demo", "-o", "out.json"]);
        assert!(cli.command.is_none());
        assert!(cli.run.demo);
        assert_eq!(cli.run.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn run_subcommand_with_mappings() {
        let cli = Cli::parse_from(["mapctl", "run", "--mappings", "in.json"]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.mappings, Some(PathBuf::from("in.json")));
                assert!(!args.demo);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn lookup_subcommand() {
        let cli = Cli::parse_from(["mapctl", "lookup", "country", "--json"]);
        match cli.command {
            Some(Commands::Lookup { column, demo, json }) => {
                assert_eq!(column, "country");
                assert!(!demo);
                assert!(json);
            }
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
