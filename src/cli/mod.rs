//! Command-line interface.

pub mod commands;
pub mod formatters;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rhc",
    version,
    about = "Search the Reach Higher curriculum by topic, skill, or genre"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (skips config discovery)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the curriculum CSV (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Advanced variant: synonym-lexicon expansion plus embedding similarity
    #[arg(long, global = true)]
    pub semantic: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search units by topic (one term, or several separated by commas)
    Topic(commands::topic::TopicArgs),
    /// Search the six skill columns for a teaching skill
    Skill(commands::skill::SkillArgs),
    /// Search units by genre
    Genre(commands::genre::GenreArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}
