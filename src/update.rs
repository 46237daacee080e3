use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::cloudflare::CloudflareClient;
use crate::config::Config;
use crate::error::Error;
use crate::query::QueryWindow;
use crate::readme::{self, PatchMode, PatchOutcome};
use crate::render::render_report;
use crate::stats::{PeriodSummary, TrafficStats};
use crate::utils::{format_number, redact_secret};

#[derive(Debug)]
pub struct UpdateResult {
    pub window: QueryWindow,
    pub stats: TrafficStats,
    pub outcome: PatchOutcome,
}

/// Fetches the zone's stats and rewrites the marker region of the configured document.
pub async fn update_readme(config: &Config) -> Result<UpdateResult, Error> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "update",
        zone_id = %config.zone_id,
        api_token = %redact_secret(&config.api_token),
        readme = ?config.readme_path,
        "Starting stats update"
    );

    let window = QueryWindow::ending_at(Utc::now());
    let client = CloudflareClient::new(config.endpoint.clone(), config.api_token.as_str());
    let stats = client.fetch_stats(&config.zone_id, &window).await?;

    let fragment = render_report(&stats);
    let mode = if config.dry_run {
        PatchMode::DryRun
    } else {
        PatchMode::Write
    };
    let outcome = readme::patch_file(&config.readme_path, &fragment, mode)?;

    if outcome == PatchOutcome::RegionNotFound {
        if !config.allow_missing_markers {
            return Err(Error::RegionNotFound {
                path: config.readme_path.clone(),
            });
        }
        warn!(action = "skip", component = "update", readme = ?config.readme_path, "Markers missing, document left unchanged");
    }

    info!(
        action = "complete",
        component = "update",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Stats update finished"
    );

    Ok(UpdateResult {
        window,
        stats,
        outcome,
    })
}

fn summary_line(label: &str, summary: &PeriodSummary) -> String {
    format!(
        "{label}: {} requests, {} page views, {} unique visitors",
        format_number(summary.request_count),
        format_number(summary.page_view_count),
        format_number(summary.unique_visitor_count)
    )
}

pub fn print_update_results(result: &UpdateResult, config: &Config) {
    println!("\n--- Cloudflare stats for zone {} ---", config.zone_id);
    println!(
        "Window: {} (24h), {} to {} (30d)",
        result.window.day, result.window.month_start, result.window.month_end
    );
    println!("{}", summary_line("Last 24 hours", &result.stats.last_24h));
    println!("{}", summary_line("Last 30 days", &result.stats.last_30d));

    match &result.outcome {
        PatchOutcome::Updated => println!("Updated {}", config.readme_path.display()),
        PatchOutcome::Unchanged => {
            println!("{} already up to date", config.readme_path.display())
        }
        PatchOutcome::RegionNotFound => println!(
            "No stats markers in {}, nothing written",
            config.readme_path.display()
        ),
        PatchOutcome::Preview(content) => {
            println!("\nDry run, {} not written:\n", config.readme_path.display());
            if let Some(region) = readme::find_region(content) {
                println!("{}", &content[region]);
            }
        }
    }
}
