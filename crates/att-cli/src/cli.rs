//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use att_core::ClockKind;

/// Attendance engine CLI.
///
/// Fetches clock events from the dashboard backend and derives session
/// intervals, period summaries, attendance classifications, and chart
/// series from them.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current clock state and today's total.
    Status,

    /// Show today / this-week / this-month totals.
    Summary {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a per-day activity series for the current week or month.
    Chart {
        /// Chart the current calendar month instead of the week.
        #[arg(long)]
        month: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record a clock punch.
    Clock {
        /// Punch direction.
        #[arg(value_enum)]
        direction: ClockDirection,
    },

    /// Live elapsed display for today's open session.
    Watch,
}

/// Clock punch direction as a CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockDirection {
    In,
    Out,
}

impl From<ClockDirection> for ClockKind {
    fn from(direction: ClockDirection) -> Self {
        match direction {
            ClockDirection::In => Self::In,
            ClockDirection::Out => Self::Out,
        }
    }
}
