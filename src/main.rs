use anyhow::{Context, Result};
use cf_readme_stats::{print_update_results, update_readme, utils, Args, Config};
use clap::Parser;
use tracing::error;

async fn run(args: &Args) -> Result<()> {
    let config = Config::from_args(args).context("Failed to load configuration")?;

    let result = update_readme(&config)
        .await
        .with_context(|| format!("Failed to update {}", config.readme_path.display()))?;

    print_update_results(&result, &config);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if let Err(e) = run(&args).await {
        error!(action = "exit", component = "main", error = %format!("{e:#}"), "Error");
        std::process::exit(1);
    }
}
