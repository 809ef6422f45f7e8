use itertools::Itertools;
use watch_wrapped::{
    filter::{RankingMode, YearSelection},
    report::{Dashboard, Report},
    stats::MINUTES_PER_VIDEO,
};

use crate::charts;

pub fn render_page(report: &Report) -> String {
    let (year_links, content) = match report {
        Report::SourceUnavailable { message, .. } => (
            String::new(),
            format!(r#"<p class="notice error">{}</p>"#, html_escape(message)),
        ),
        Report::NoData {
            year,
            year_options,
            message,
        } => (
            year_links(year_options, *year, RankingMode::default()),
            format!(r#"<p class="notice warning">{}</p>"#, html_escape(message)),
        ),
        Report::Dashboard(dashboard) => (
            year_links(
                dashboard.year_options(),
                dashboard.filter().year,
                dashboard.filter().mode,
            ),
            render_dashboard(dashboard),
        ),
    };
    format!(
        include_str!("dashboard_template.html"),
        year_links = year_links,
        content = content,
    )
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let stats = dashboard.stats();
    let filter = dashboard.filter();
    let label = dashboard.metric_label();

    let modes = [RankingMode::TotalViews, RankingMode::UniqueVideos]
        .into_iter()
        .map(|mode| {
            let text = match mode {
                RankingMode::TotalViews => "Total Views (Includes Re-watches)",
                RankingMode::UniqueVideos => "Unique Videos (Ignores Re-watches)",
            };
            format!(
                r#"<a href="{}"{}>{text}</a>"#,
                href(filter.year, mode),
                selected(mode == filter.mode),
            )
        })
        .join("");

    let metrics = [
        (label.to_owned(), stats.filtered_count().to_string()),
        ("Top Channel".to_owned(), stats.top_channel_label().to_owned()),
        (
            format!("Est. Hours ({MINUTES_PER_VIDEO}m avg)"),
            format!("{} hrs", stats.estimated_hours()),
        ),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
            html_escape(label),
            html_escape(value),
        )
    })
    .join("");

    let top_channels = stats
        .top_channels()
        .iter()
        .map(|x| (x.channel.to_string(), x.count))
        .collect_vec();
    let monthly = stats
        .monthly_counts()
        .map(|(month, count)| (month.to_string(), count))
        .collect_vec();

    format!(
        concat!(
            r#"<h2>{heading}</h2>"#,
            r#"<div class="modes">Ranking Logic: {modes}</div>"#,
            r#"<div class="metrics">{metrics}</div>"#,
            r#"<h3>Top Channels ({label})</h3>{top_channels}"#,
            r#"<h3>Viewing Heatmap</h3>"#,
            r#"<p class="caption">When you watched YouTube in {year}</p>{heatmap}"#,
            r#"<h3>Activity by Month</h3>{monthly}"#,
        ),
        heading = html_escape(dashboard.heading()),
        modes = modes,
        metrics = metrics,
        label = label,
        year = filter.year,
        top_channels = charts::horizontal_bars(&top_channels),
        heatmap = charts::heatmap(stats.heatmap()),
        monthly = charts::vertical_bars(&monthly),
    )
}

fn year_links(options: &[YearSelection], current: YearSelection, mode: RankingMode) -> String {
    options
        .iter()
        .map(|&year| {
            format!(
                r#"<li><a href="{}"{}>{year}</a></li>"#,
                href(year, mode),
                selected(year == current),
            )
        })
        .join("")
}

fn href(year: YearSelection, mode: RankingMode) -> String {
    let year = match year {
        YearSelection::AllTime => "all".to_owned(),
        YearSelection::Year(year) => year.to_string(),
    };
    let mode = match mode {
        RankingMode::TotalViews => "total",
        RankingMode::UniqueVideos => "unique",
    };
    format!("/?year={year}&amp;mode={mode}")
}

fn selected(yes: bool) -> &'static str {
    if yes {
        r#" class="selected""#
    } else {
        ""
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
