use std::{fmt::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use watch_wrapped::{
    filter::{FilterState, RankingMode, YearSelection},
    loader::{HistoryCache, DEFAULT_HISTORY_PATH},
    report::{build_report, Dashboard, Report},
    stats::{HOURS_PER_DAY, MINUTES_PER_VIDEO},
    table::Weekday,
};

#[derive(Parser)]
struct Opts {
    #[arg(default_value = DEFAULT_HISTORY_PATH)]
    history_file: PathBuf,
    /// A year such as 2024, or "all".
    #[arg(long, default_value = "all")]
    year: YearSelection,
    #[arg(long, value_enum, default_value_t)]
    mode: RankingMode,
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let filter = FilterState::builder()
        .year(opts.year)
        .mode(opts.mode)
        .build();

    let mut cache = HistoryCache::new();
    let history = cache.get_or_load(&opts.history_file);
    let report = build_report(&opts.history_file, history.as_deref(), filter);

    if opts.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("While serializing the report")?
        );
    } else {
        print!("{}", render_text(&report)?);
    }
    Ok(())
}

fn render_text(report: &Report) -> anyhow::Result<String> {
    let mut out = String::new();
    match report {
        Report::SourceUnavailable { message, .. } => writeln!(out, "{message}")?,
        Report::NoData {
            year_options,
            message,
            ..
        } => {
            writeln!(out, "Years: {}", year_options.iter().join(" | "))?;
            writeln!(out, "{message}")?;
        }
        Report::Dashboard(dashboard) => render_dashboard(&mut out, dashboard)?,
    }
    Ok(out)
}

fn render_dashboard(out: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    let stats = dashboard.stats();
    let label = dashboard.metric_label();

    writeln!(out, "{}", dashboard.heading())?;
    writeln!(out, "Years: {}", dashboard.year_options().iter().join(" | "))?;
    writeln!(out)?;

    let hours_label = format!("Est. Hours ({MINUTES_PER_VIDEO}m avg)");
    writeln!(out, "{label:<20}{:<32}{hours_label}", "Top Channel")?;
    writeln!(
        out,
        "{:<20}{:<32}{} hrs",
        stats.filtered_count().to_formatted_string(&Locale::en),
        stats.top_channel_label(),
        stats.estimated_hours().to_formatted_string(&Locale::en),
    )?;
    writeln!(out)?;

    writeln!(out, "Top Channels ({label})")?;
    let width = stats
        .top_channels()
        .iter()
        .map(|x| x.channel.to_string().chars().count())
        .max()
        .unwrap_or(0);
    for (rank, entry) in stats.top_channels().iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<width$}  {:>6}",
            rank + 1,
            entry.channel.to_string(),
            entry.count.to_formatted_string(&Locale::en),
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Viewing Heatmap")?;
    writeln!(
        out,
        "{:<10}{}",
        "",
        (0..HOURS_PER_DAY).map(|h| format!("{h:>4}")).join("")
    )?;
    for weekday in enum_iterator::all::<Weekday>() {
        writeln!(
            out,
            "{:<10}{}",
            weekday.to_string(),
            stats
                .heatmap()
                .row(weekday)
                .iter()
                .map(|&count| match count {
                    0 => format!("{:>4}", "."),
                    _ => format!("{count:>4}"),
                })
                .join("")
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Activity by Month")?;
    let max = stats.monthly_counts().map(|x| x.1).max().unwrap_or(0).max(1);
    for (month, count) in stats.monthly_counts() {
        let bar = "#".repeat((count * 40).div_ceil(max));
        writeln!(out, "{:<10}{count:>6} {bar}", month.to_string())?;
    }
    Ok(())
}
