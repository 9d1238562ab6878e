//! Command-line arguments.

use crate::config::{ReportConfig, DEFAULT_SOURCE};
use crate::loader::ParseMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shift-report")]
#[command(version)]
#[command(about = "Rank and cross-tabulate security guard shift records", long_about = None)]
pub struct Cli {
    /// CSV file with guard_name, date, hour and position columns
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    pub input: PathBuf,

    /// Skip rows with a malformed date or hour instead of failing the load
    #[arg(long)]
    pub lenient: bool,

    /// Rows in each leaderboard
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Rows in the short leader list
    #[arg(long, default_value_t = 5)]
    pub preview_n: usize,

    /// Guards kept in the guard × hour and guard × position matrices
    #[arg(long, default_value_t = 15)]
    pub matrix_top_guards: usize,

    /// Recent shifts listed on a guard profile
    #[arg(long, default_value_t = 10)]
    pub recent_shifts: usize,

    /// Directory for exported CSV and JSON files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Log at debug level to stderr
    #[arg(long)]
    pub debug: bool,

    /// Run one report and exit; without a command an interactive menu starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Totals of guards, shifts, positions and hours
    Overview,
    /// Guard leaderboard and top-guard matrices, exported to --out-dir
    Top,
    /// Guards ranked within one hour slot
    Hour { label: String },
    /// Guards ranked within one post
    Position { label: String },
    /// Breakdown for a single guard
    Guard { name: String },
    /// Print the selectable values of one field
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListKind {
    Hours,
    Positions,
    Guards,
}

impl Cli {
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            top_n: self.top_n,
            preview_n: self.preview_n,
            matrix_top_guards: self.matrix_top_guards,
            recent_shifts: self.recent_shifts,
            parse_mode: if self.lenient {
                ParseMode::Lenient
            } else {
                ParseMode::Strict
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_config() {
        let cli = Cli::try_parse_from(["shift-report"]).unwrap();
        assert_eq!(cli.report_config(), ReportConfig::default());
        assert_eq!(cli.input, PathBuf::from(DEFAULT_SOURCE));
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "shift-report",
            "--lenient",
            "--matrix-top-guards",
            "3",
            "-i",
            "log.csv",
            "hour",
            "08:00",
        ])
        .unwrap();
        let cfg = cli.report_config();
        assert_eq!(cfg.parse_mode, ParseMode::Lenient);
        assert_eq!(cfg.matrix_top_guards, 3);
        assert_eq!(cli.input, PathBuf::from("log.csv"));
        assert!(matches!(cli.command, Some(Command::Hour { ref label }) if label == "08:00"));
    }
}
