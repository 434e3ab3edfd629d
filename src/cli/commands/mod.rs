//! Subcommand dispatch.

pub mod genre;
pub mod skill;
pub mod topic;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Topic(args) => topic::run(ctx, args),
        Commands::Skill(args) => skill::run(ctx, args),
        Commands::Genre(args) => genre::run(ctx, args),
    }
}
