//! `helpdesk stats`: summary report, user activity and category trends.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use helpdesk_core::analytics::MAX_TREND_DAYS;
use helpdesk_types::error::AnalyticsError;
use helpdesk_types::stats::{CategoryTrends, StatisticsReport, UserActivity};

use crate::state::AppState;

/// Print the summary report.
pub async fn summary(state: &AppState, json: bool) -> Result<()> {
    let report = state.analytics_service.summarize().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report);
    Ok(())
}

/// Print one user's activity. Unknown users are reported, not an error.
pub async fn user(state: &AppState, user_id: &str, json: bool) -> Result<()> {
    let activity = match state.analytics_service.user_activity(user_id).await {
        Ok(activity) => activity,
        Err(AnalyticsError::NotFound { user_id }) => {
            if json {
                println!("{}", serde_json::json!({ "user_id": user_id, "found": false }));
            } else {
                println!();
                println!(
                    "  {} No conversations for '{}'",
                    style("∅").dim(),
                    style(&user_id).cyan()
                );
                println!();
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&activity)?);
        return Ok(());
    }

    print_activity(&activity);
    Ok(())
}

/// Print per-category trends over the last `days` days (1..=365).
pub async fn trends(state: &AppState, days: u32, json: bool) -> Result<()> {
    let days = days.clamp(1, MAX_TREND_DAYS);
    let trends = state.analytics_service.category_trends(days).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trends)?);
        return Ok(());
    }

    print_trends(&trends, days);
    Ok(())
}

fn print_summary(report: &StatisticsReport) {
    println!();
    println!("  {} Helpdesk statistics", style("📊").bold());
    println!();

    println!("  {}", style("── Conversations ──").dim());
    println!("  Total:     {}", style(report.total_conversations).bold());
    println!("  Last 24h:  {}", report.recent_conversations);
    println!("  Last 7d:   {}", report.week_conversations);
    println!();

    if !report.categories.is_empty() {
        println!("  {}", style("── Categories ──").dim());
        for (category, count) in &report.categories {
            println!("  {:<12} {}", category.to_string(), count);
        }
        println!();
    }

    println!("  {}", style("── Last 7 days ──").dim());
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::White),
        Cell::new("Conversations").fg(Color::White),
    ]);
    for day in &report.daily_stats {
        let count = if day.count == 0 {
            Cell::new(day.count).fg(Color::DarkGrey)
        } else {
            Cell::new(day.count).fg(Color::Green)
        };
        table.add_row(vec![Cell::new(day.date.format("%Y-%m-%d")), count]);
    }
    println!("{table}");
    println!();

    if !report.top_users.is_empty() {
        println!("  {}", style("── Top users ──").dim());
        for user in &report.top_users {
            println!("  {:<20} {}", user.user_id, user.count);
        }
        println!();
    }

    println!("  {}", style("── Service level ──").dim());
    println!("  Avg response:  {:.1}s", report.avg_response_time);
    println!(
        "  SLA 1h/4h/24h: {:.1}% / {:.1}% / {:.1}%",
        report.sla_metrics.sla_1h, report.sla_metrics.sla_4h, report.sla_metrics.sla_24h
    );
    println!("  Satisfaction:  {:.1}", report.sla_metrics.satisfaction_score);
    println!();
}

fn print_activity(activity: &UserActivity) {
    println!();
    println!(
        "  {} Activity for '{}'",
        style("👤").bold(),
        style(&activity.user_id).cyan()
    );
    println!();
    println!("  Conversations: {}", style(activity.total_conversations).bold());
    println!("  First contact: {}", activity.first_contact.format("%Y-%m-%d %H:%M UTC"));
    println!("  Last contact:  {}", activity.last_contact.format("%Y-%m-%d %H:%M UTC"));
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("When").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);
    for entry in &activity.recent_conversations {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(entry.category).fg(Color::Cyan),
            Cell::new(&entry.message),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_trends(trends: &CategoryTrends, days: u32) {
    println!();
    println!("  {} Category trends, last {days} days", style("📈").bold());
    println!();

    if trends.is_empty() {
        println!("  {}", style("No conversations recorded yet.").dim());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Category").fg(Color::White),
        Cell::new("Total").fg(Color::White),
        Cell::new("Peak day").fg(Color::White),
    ]);
    for (category, series) in trends {
        let total: u64 = series.iter().map(|d| d.count).sum();
        let peak = series
            .iter()
            .filter(|d| d.count > 0)
            .max_by_key(|d| d.count)
            .map(|d| format!("{} ({})", d.date.format("%Y-%m-%d"), d.count))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![Cell::new(category), Cell::new(total), Cell::new(peak)]);
    }
    println!("{table}");
    println!();
}
