use clap::Parser;
use dotenv::dotenv;
use futures::TryStreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::pin::pin;
use tracing::info;

use angular_dep_search_lib::{report, Args, GitHubSearcher, SearchQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize the tracing logger
    tracing_subscriber::fmt::init();

    dotenv().ok();

    let args = Args::parse();

    let searcher = GitHubSearcher::new(&args)?;
    let query = SearchQuery::new(&args.query)
        .filename(&args.filename)
        .repo(&args.repo);

    // Spinner lives on stderr; stdout carries only the per-match reports.
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(format!("Searching '{}' in {}", args.query, args.repo));

    let mut matches = pin!(searcher.search(&query));
    let mut count: u64 = 0;

    while let Some(hit) = matches.try_next().await? {
        pb.set_message(format!("Fetching {}", hit.path));
        let content = searcher.fetch_content(&hit).await?;
        let match_report = report::project(&hit, &content)?;
        pb.suspend(|| println!("{}", match_report));
        count += 1;
        pb.tick();
    }

    pb.finish_and_clear();
    info!("reported {} matches", count);
    Ok(())
}
