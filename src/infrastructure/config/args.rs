use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "appsearch",
    version,
    about = "Search the app catalog from your terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Maximum number of images kept in memory.
    #[arg(long, value_name = "COUNT")]
    pub cache_capacity: Option<usize>,

    /// Maximum concurrent image downloads.
    #[arg(long, value_name = "COUNT")]
    pub max_concurrent_fetches: Option<usize>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Catalog service root URL.
    #[arg(long, value_name = "URL", env = "APPSEARCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Query to run on startup.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}
