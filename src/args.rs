use clap::Parser;

/// CLI tool that searches GitHub code for package.json files in one
/// repository and reports the Angular dependency version of each match.
#[derive(Parser)]
#[clap(
    author,
    version,
    about,
    long_about = "Searches the GitHub code-search API for package.json files matching a free-text term within one repository, then prints the Angular dependency version found in each matched file."
)]
pub struct Args {
    /// Free-text term to search for in file contents.
    #[clap(short, long, default_value = "angular")]
    pub query: String,

    /// Filename qualifier: only files with this name match.
    #[clap(short, long, default_value = "package.json")]
    pub filename: String,

    /// Repository qualifier, as owner/name.
    #[clap(short, long, default_value = "gothinkster/angularjs-realworld-example-app")]
    pub repo: String,

    /// GitHub API token. Falls back to the AUTH_TOKEN environment variable;
    /// requests are anonymous when neither is set.
    #[clap(short, long)]
    pub token: Option<String>,

    /// Maximum number of pages to retrieve.
    /// Each page contains up to 100 results.
    #[clap(short = 'p', long, value_name = "NUM")]
    pub max_pages: Option<u32>,
}
