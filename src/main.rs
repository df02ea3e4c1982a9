mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use scicalc::{evaluate, format, normalize, AngleMode};
use tracing_subscriber::EnvFilter;

/// Scientific keypad calculator for the terminal.
#[derive(Parser, Debug)]
#[command(name = "scicalc", version, about)]
struct Args {
    /// Angle mode for sin, cos and tan: deg or rad
    #[arg(long, default_value = "deg")]
    angle: AngleMode,

    /// Evaluate EXPR once, print the result and exit
    #[arg(short, long = "eval", value_name = "EXPR")]
    eval: Option<String>,

    /// Use the line-oriented front-end instead of the full screen one
    #[cfg(feature = "line")]
    #[arg(long)]
    line: bool,

    /// Write logs to PATH instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn run_once(expr: &str, angle_mode: AngleMode) -> Result<()> {
    let result = evaluate(&normalize(expr), angle_mode);
    println!("{}", format(&result));
    if result.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_interactive(args: &Args) -> Result<()> {
    #[cfg(feature = "line")]
    if args.line {
        return line_mode::run_line(args.angle);
    }

    #[cfg(feature = "tui")]
    return tui_mode::run_tui(args.angle);

    #[cfg(not(feature = "tui"))]
    anyhow::bail!("built without an interactive front-end ({:?}); use --eval", args.angle)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    match &args.eval {
        Some(expr) => run_once(expr, args.angle),
        None => run_interactive(&args),
    }
}
