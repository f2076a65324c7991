use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zcalc::calculator::{Calculator, copy_result, parse_keys};
use zcalc::config::{Config, OutputFormat};

/// Keypad calculator. Each character is a key press:
/// 0-9 . + - * x / = and c (clear).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Keys to press. Reads key lines from stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Config file path (defaults to $XDG_CONFIG_HOME/zcalc/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the formula next to the display.
    #[arg(long)]
    show_formula: bool,

    /// Copy the final result to the clipboard.
    #[arg(long)]
    copy: bool,

    /// Print the state as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    config.show_formula |= cli.show_formula;
    config.copy_result |= cli.copy;
    if cli.json {
        config.output = OutputFormat::Json;
    }

    let mut calc = Calculator::new();
    let mut stdout = io::stdout().lock();

    if cli.keys.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read from stdin")?;
            feed(&mut calc, &line);
            print_state(&mut stdout, &calc, &config)?;
        }
    } else {
        feed(&mut calc, &cli.keys.join(" "));
        print_state(&mut stdout, &calc, &config)?;
    }

    if config.copy_result && !copy_result(&calc)? {
        tracing::info!(display = calc.display(), "nothing to copy");
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Press every key in `line`. A bad character is reported and the line's
/// keys are skipped so the session stays usable.
fn feed(calc: &mut Calculator, line: &str) {
    match parse_keys(line) {
        Ok(keys) => calc.press_all(keys),
        Err(err) => tracing::error!(%err, line, "ignoring input line"),
    }
}

fn print_state(out: &mut impl Write, calc: &Calculator, config: &Config) -> Result<()> {
    match config.output {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, calc).context("failed to serialize state")?;
            writeln!(out)?;
        }
        OutputFormat::Plain if config.show_formula => {
            writeln!(out, "{}    [{}]", calc.display(), calc.formula())?;
        }
        OutputFormat::Plain => writeln!(out, "{}", calc.display())?,
    }
    out.flush().context("failed to write to stdout")
}
