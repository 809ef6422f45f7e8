//! Turns a loaded history and the current filter into what a front end shows.

use std::path::{Path, PathBuf};

use getset::{CopyGetters, Getters};
use serde::Serialize;

use crate::{
    filter::{FilterState, YearSelection},
    loader::SourceUnavailable,
    stats::{aggregate, EmptyFilterResult, WatchStats},
    table::WatchEventTable,
};

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Report {
    /// Nothing could be loaded. Front ends show `message` and nothing else.
    SourceUnavailable { path: PathBuf, message: String },
    /// The history loaded, but the selected year is empty.
    NoData {
        year: YearSelection,
        year_options: Vec<YearSelection>,
        message: String,
    },
    Dashboard(Dashboard),
}

#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters, Serialize)]
pub struct Dashboard {
    #[getset(get = "pub")]
    heading: String,
    #[getset(get_copy = "pub")]
    metric_label: &'static str,
    #[getset(get = "pub")]
    year_options: Vec<YearSelection>,
    #[getset(get_copy = "pub")]
    filter: FilterState,
    #[getset(get = "pub")]
    stats: WatchStats,
}

pub fn build_report(
    path: &Path,
    history: Result<&WatchEventTable, &SourceUnavailable>,
    filter: FilterState,
) -> Report {
    // An export without a single readable entry is treated like a missing one.
    let table = match history {
        Ok(table) if !table.is_empty() => table,
        _ => {
            return Report::SourceUnavailable {
                path: path.to_owned(),
                message: load_failure_message(path),
            }
        }
    };
    let year_options = year_options(table);
    match aggregate(table, filter) {
        Ok(stats) => Report::Dashboard(Dashboard {
            heading: heading(filter.year),
            metric_label: filter.mode.metric_label(),
            year_options,
            filter,
            stats,
        }),
        Err(e @ EmptyFilterResult { year }) => Report::NoData {
            year,
            year_options,
            message: e.to_string(),
        },
    }
}

pub fn load_failure_message(path: &Path) -> String {
    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());
    format!("Could not load data. Please ensure '{name}' is in the folder.")
}

/// "All Time" first, then every year with data, newest first.
pub fn year_options(table: &WatchEventTable) -> Vec<YearSelection> {
    std::iter::once(YearSelection::AllTime)
        .chain(table.available_years().into_iter().map(YearSelection::Year))
        .collect()
}

pub fn heading(year: YearSelection) -> String {
    match year {
        YearSelection::AllTime => "Your All-Time Stats".to_owned(),
        YearSelection::Year(year) => format!("Your Stats for {year}"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{build_report, load_failure_message, Report};
    use crate::{
        filter::{FilterState, RankingMode, YearSelection},
        loader::SourceUnavailable,
        parser::extract,
        table::WatchEventTable,
    };

    fn entry(video: &str, title: &str, channel: &str, date: &str) -> String {
        format!(
            r#"<div class="content-cell">Watched <a href="https://www.youtube.com/watch?v={video}">{title}</a><br><a href="https://www.youtube.com/channel/{channel}">{channel}</a><br>{date}<br></div>"#
        )
    }

    /// Two watches of the same video on the same channel, and one broken entry.
    fn history() -> WatchEventTable {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            entry("a", "Same video", "Chan", "10 Feb 2024, 20:00:00 GMT"),
            entry("b", "Broken", "Other", "not a date GMT+01:00"),
            entry("a", "Same video", "Chan", "12 Feb 2024, 21:00:00 GMT"),
        );
        WatchEventTable::new(extract(&html))
    }

    fn stats_count(report: &Report) -> usize {
        match report {
            Report::Dashboard(dashboard) => dashboard.stats().filtered_count(),
            otherwise => panic!("Expected a dashboard, found {otherwise:?}"),
        }
    }

    #[test]
    fn total_and_unique_end_to_end() {
        let table = history();
        let path = Path::new("watch-history.html");

        let total = build_report(path, Ok(&table), FilterState::default());
        assert_eq!(stats_count(&total), 2);

        let unique = build_report(
            path,
            Ok(&table),
            FilterState::builder().mode(RankingMode::UniqueVideos).build(),
        );
        assert_eq!(stats_count(&unique), 1);
        let Report::Dashboard(dashboard) = unique else {
            unreachable!()
        };
        assert_eq!(dashboard.metric_label(), "Unique Videos");
        assert_eq!(dashboard.heading(), "Your All-Time Stats");
        assert_eq!(
            dashboard.year_options(),
            &[YearSelection::AllTime, YearSelection::Year(2024)]
        );
        // The earlier watch survives.
        assert_eq!(
            dashboard
                .stats()
                .heatmap()
                .get(crate::table::Weekday::Saturday, 20),
            1
        );
        assert_eq!(dashboard.stats().top_channel_label(), "Chan");
    }

    #[test]
    fn empty_year_is_no_data() {
        let table = history();
        let filter = FilterState::builder().year(YearSelection::Year(2020)).build();
        let report = build_report(Path::new("watch-history.html"), Ok(&table), filter);
        assert_eq!(
            report,
            Report::NoData {
                year: YearSelection::Year(2020),
                year_options: vec![YearSelection::AllTime, YearSelection::Year(2024)],
                message: "No videos found for 2020.".to_owned(),
            }
        );
    }

    #[test]
    fn year_heading() {
        let table = history();
        let filter = FilterState::builder().year(YearSelection::Year(2024)).build();
        match build_report(Path::new("watch-history.html"), Ok(&table), filter) {
            Report::Dashboard(dashboard) => {
                assert_eq!(dashboard.heading(), "Your Stats for 2024");
                assert_eq!(dashboard.metric_label(), "Total Views");
            }
            otherwise => panic!("Expected a dashboard, found {otherwise:?}"),
        }
    }

    #[test]
    fn load_failures() {
        let path = Path::new("some/dir/watch-history.html");
        let message = "Could not load data. Please ensure 'watch-history.html' is in the folder.";
        assert_eq!(load_failure_message(path), message);

        let error = SourceUnavailable {
            path: path.to_owned(),
            source: std::io::ErrorKind::NotFound.into(),
        };
        let expected = Report::SourceUnavailable {
            path: path.to_owned(),
            message: message.to_owned(),
        };
        assert_eq!(
            build_report(path, Err(&error), FilterState::default()),
            expected
        );
        assert_eq!(
            build_report(path, Ok(&WatchEventTable::default()), FilterState::default()),
            expected
        );
    }

    #[test]
    fn serializes_with_state_tag() {
        let path = Path::new("watch-history.html");
        let report = build_report(path, Ok(&WatchEventTable::default()), FilterState::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["state"], "source_unavailable");

        let table = history();
        let json = serde_json::to_value(build_report(path, Ok(&table), FilterState::default()))
            .unwrap();
        assert_eq!(json["state"], "dashboard");
        assert_eq!(json["stats"]["filtered_count"], 2);
        assert_eq!(json["stats"]["monthly"]["February"], 2);
        assert_eq!(json["filter"]["year"], "All Time");
    }
}
