//! rhc genre - Search units by genre

use std::time::Instant;

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::search_results::SearchResults;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct GenreArgs {
    /// Genre tag, e.g. "mystery"
    pub query: String,
}

pub fn run(ctx: &AppContext, args: &GenreArgs) -> Result<()> {
    let started = Instant::now();
    let matches = ctx.engine.genre_search(&args.query)?;
    SearchResults::genre(&args.query, matches)
        .with_duration(started.elapsed())
        .render(ctx.output_format)
}
