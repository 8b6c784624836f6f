use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::fmt;

#[derive(Parser)]
#[command(name = "orgpop")]
#[command(about = "Popup agenda indexed from plain-text org outlines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Stay resident in the background (tray mode) instead of opening immediately
    #[arg(long)]
    pub tray: bool,

    /// Single-instance mode: signal a running instance to close instead of opening a second one
    #[arg(long)]
    pub toggle: bool,

    /// Root directory to scan (repeatable; overrides the configured roots)
    #[arg(long = "dir", value_name = "PATH")]
    pub dirs: Vec<String>,

    /// Pin the popup to the top-left screen corner at the given offsets
    #[arg(long, value_name = "X,Y", value_parser = parse_offsets, conflicts_with = "top_right")]
    pub top_left: Option<(i32, i32)>,

    /// Pin the popup to the top-right screen corner at the given offsets
    #[arg(long, value_name = "X,Y", value_parser = parse_offsets)]
    pub top_right: Option<(i32, i32)>,

    /// Date to open the calendar on (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    /// Configuration file override
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Print scan statistics to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn placement(&self) -> Option<Placement> {
        if let Some((x, y)) = self.top_left {
            return Some(Placement::TopLeft { x, y });
        }
        if let Some((x, y)) = self.top_right {
            return Some(Placement::TopRight { x, y });
        }
        None
    }
}

/// Fixed-position override for the popup window; default placement is
/// cursor-relative and belongs to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    TopLeft { x: i32, y: i32 },
    TopRight { x: i32, y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn parse_offsets(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y offsets, got '{s}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid X offset '{}'", x.trim()))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid Y offset '{}'", y.trim()))?;
    Ok((x, y))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("invalid date '{s}': {err}"))
}
