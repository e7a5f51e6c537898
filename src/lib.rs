//! # Angular Dep Search
//!
//! A Rust library for finding the Angular dependency version declared in
//! `package.json` files on GitHub, built on the code-search API.
//!
//! ## Main Components
//!
//! - [`GitHubSearcher`]: authenticated handle issuing searches and content fetches
//! - [`SearchQuery`]: free-text term plus filename/repo qualifiers
//! - [`MatchReport`]: the four-line report printed per match
//! - [`Args`]: command line argument structure
//!
//! ## Example
//!
//! ```no_run
//! use angular_dep_search_lib::{Args, GitHubSearcher, SearchQuery, report};
//! use clap::Parser;
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let args = Args::parse();
//!     let searcher = GitHubSearcher::new(&args)?;
//!     let query = SearchQuery::new(&args.query)
//!         .filename(&args.filename)
//!         .repo(&args.repo);
//!
//!     let mut matches = std::pin::pin!(searcher.search(&query));
//!     while let Some(hit) = matches.try_next().await? {
//!         let content = searcher.fetch_content(&hit).await?;
//!         println!("{}", report::project(&hit, &content)?);
//!     }
//!     Ok(())
//! }
//! ```

mod args;
pub mod error;
pub mod model;
pub mod query;
pub mod report;
mod searcher;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::error::SearchError;
pub use crate::query::SearchQuery;
pub use crate::report::MatchReport;
pub use crate::searcher::GitHubSearcher;
