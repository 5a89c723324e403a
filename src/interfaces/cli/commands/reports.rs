//! Report commands (kpis / campaigns / trends)

use colored::Colorize;
use std::sync::Arc;

use crate::analytics::DateWindow;
use crate::api::services::types::{
    CampaignStatsResponse, DailyTrendPoint, KpiResponse, convert_all,
};
use crate::config::get_config;
use crate::errors::DashboardError;
use crate::interfaces::cli::CliError;
use crate::services::{AnalyticsService, CampaignService};
use crate::storage::{DateRange, SeaOrmStorage};
use crate::utils::dates::parse_date_param;

fn parse_date_arg(name: &str, raw: Option<String>) -> Result<Option<chrono::NaiveDate>, CliError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_date_param(Some(&value))
            .map(Some)
            .ok_or_else(|| {
                DashboardError::date_parse(format!("Invalid --{} date: {}", name, value)).into()
            }),
    }
}

pub async fn print_kpis(
    storage: Arc<SeaOrmStorage>,
    start: Option<String>,
    end: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let range = DateRange::new(parse_date_arg("start", start)?, parse_date_arg("end", end)?);
    let kpis = AnalyticsService::new(storage).kpis(range).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&KpiResponse::from(kpis))?
        );
        return Ok(());
    }

    let label = match (range.start, range.end) {
        (None, None) => "all time".to_string(),
        (start, end) => format!(
            "{} .. {}",
            start.map(|d| d.to_string()).unwrap_or_else(|| "*".into()),
            end.map(|d| d.to_string()).unwrap_or_else(|| "*".into())
        ),
    };
    println!("{} {}", "KPIs".bold().green(), format!("({})", label).dimmed());
    println!("  {:<10} {}", "Views", kpis.total_views.to_string().cyan());
    println!("  {:<10} {}", "Likes", kpis.total_likes.to_string().cyan());
    println!("  {:<10} {}", "Comments", kpis.total_comments.to_string().cyan());
    println!("  {:<10} {}", "Shares", kpis.total_shares.to_string().cyan());
    Ok(())
}

pub async fn print_campaigns(storage: Arc<SeaOrmStorage>, json: bool) -> Result<(), CliError> {
    let stats = CampaignService::new(storage).campaign_stats().await?;

    if json {
        let response: Vec<CampaignStatsResponse> = convert_all(stats);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("{} No campaigns found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Campaigns:".bold().green());
    println!();
    for campaign in &stats {
        println!(
            "  {} {} {}",
            format!("#{}", campaign.client_id).dimmed(),
            campaign.campaign.cyan(),
            format!("[{}]", campaign.status).yellow()
        );
        println!(
            "    posts: {}  views: {}  avg engagement: {:.2}",
            campaign.post_count, campaign.total_views, campaign.avg_engagement
        );
        if let Some(span) = &campaign.date_range {
            println!(
                "    {}",
                format!("{} .. {}", span.earliest, span.latest).dimmed()
            );
        }
    }
    println!();
    println!(
        "{} Total {} campaigns",
        "ℹ".bold().blue(),
        stats.len().to_string().green()
    );
    Ok(())
}

pub async fn print_trends(
    storage: Arc<SeaOrmStorage>,
    days: Option<u32>,
    json: bool,
) -> Result<(), CliError> {
    let config = get_config();
    let days = days
        .unwrap_or(config.analytics.default_days)
        .min(config.analytics.max_days);
    let trends = AnalyticsService::new(storage)
        .daily_trends(DateWindow::last_days(days))
        .await?;

    if json {
        let response: Vec<DailyTrendPoint> = convert_all(trends);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if trends.is_empty() {
        println!(
            "{} No postings in the last {} days",
            "ℹ".bold().blue(),
            days
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Daily trends".bold().green(),
        format!("(last {} days)", days).dimmed()
    );
    for point in &trends {
        println!(
            "  {}  views: {:>12}  engagement: {:.4}",
            point.date,
            point.views.to_string().cyan(),
            point.engagement
        );
    }
    Ok(())
}
