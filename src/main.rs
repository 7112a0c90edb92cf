use std::path::Path;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    let cli = bookscout::cli::Cli::parse();

    match cli.command {
        bookscout::cli::Command::Scrape(args) => {
            let _guard = bookscout::logging::init(Path::new(&args.log_dir), "scrape")
                .context("init logging")?;
            tracing::debug!(?args, "parsed cli");
            bookscout::scrape::run(args).await.context("scrape")?;
        }
        bookscout::cli::Command::Analyze(args) => {
            let _guard = bookscout::logging::init(Path::new(&args.log_dir), "analyze")
                .context("init logging")?;
            tracing::debug!(?args, "parsed cli");
            tokio::task::block_in_place(|| bookscout::analyze::run(args)).context("analyze")?;
        }
    }

    Ok(())
}
