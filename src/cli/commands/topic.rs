//! rhc topic - Search units by topic

use std::time::Instant;

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::search_results::SearchResults;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct TopicArgs {
    /// Topic term, or several separated by commas
    pub query: String,
}

pub fn run(ctx: &AppContext, args: &TopicArgs) -> Result<()> {
    let started = Instant::now();
    let matches = ctx.engine.topic_search(&args.query)?;
    SearchResults::topic(&args.query, matches)
        .with_duration(started.elapsed())
        .render(ctx.output_format)
}
