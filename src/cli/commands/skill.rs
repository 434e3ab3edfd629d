//! rhc skill - Search the six skill columns

use std::time::Instant;

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::search_results::SearchResults;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SkillArgs {
    /// Skill to look for, e.g. "main idea"
    pub query: String,
}

pub fn run(ctx: &AppContext, args: &SkillArgs) -> Result<()> {
    let started = Instant::now();
    let matches = ctx.engine.skill_search(&args.query)?;
    SearchResults::skill(&args.query, matches)
        .with_duration(started.elapsed())
        .render(ctx.output_format)
}
