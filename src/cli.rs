use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Scrape(ScrapeArgs),
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ScrapeArgs {
    /// Category listing endpoint (returns an HTML fragment per page).
    #[arg(
        long,
        default_value = "https://www.yes24.com/product/category/CategoryProductContents"
    )]
    pub base_url: String,

    /// Category id sent as `dispNo`.
    #[arg(long, default_value = "001001003032")]
    pub category: String,

    /// First listing page to request.
    #[arg(long, default_value_t = 1)]
    pub first_page: u32,

    /// Last listing page to request (inclusive).
    #[arg(long, default_value_t = 10)]
    pub last_page: u32,

    /// Items per listing page.
    #[arg(long, default_value_t = 120)]
    pub page_size: u32,

    /// Output CSV path.
    #[arg(long, default_value = "yes24/data/yes24_ai.csv")]
    pub out: String,

    /// Directory for rotating scrape logs.
    #[arg(long, default_value = "yes24")]
    pub log_dir: String,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Input CSV path (written by `scrape`).
    #[arg(long, default_value = "yes24/data/yes24_ai.csv")]
    pub input: String,

    /// Output directory for chart images.
    #[arg(long, default_value = "yes24/plots")]
    pub out: String,

    /// Font file for chart text and the word cloud (default: chosen by OS).
    #[arg(long)]
    pub font: Option<String>,

    /// Directory for rotating analysis logs.
    #[arg(long, default_value = "yes24/log")]
    pub log_dir: String,
}
