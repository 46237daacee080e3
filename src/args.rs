use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.cloudflare.com/client/v4/graphql";

#[derive(Parser, Debug)]
#[command(
    name = "cf-readme-stats",
    about = "Fetch Cloudflare traffic analytics and rewrite the stats block of a README",
    version,
    long_about = None
)]
pub struct Args {
    /// Cloudflare zone identifier to query
    #[arg(long, env = "CLOUDFLARE_ZONE_ID")]
    pub zone_id: Option<String>,

    /// Cloudflare API token with Analytics:Read permission
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Document containing the stats markers
    #[arg(long, env = "CF_STATS_README", default_value = "README.md")]
    pub readme: PathBuf,

    /// GraphQL analytics endpoint
    #[arg(long, env = "CF_STATS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Print the updated document instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Exit successfully when the stats markers are missing
    #[arg(long)]
    pub allow_missing_markers: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
