use enum_map::EnumMap;
use getset::{CopyGetters, Getters};
use hashbrown::HashSet;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::{
    filter::{FilterState, RankingMode, YearSelection},
    schema::ChannelName,
    table::{Month, WatchEventTable, WatchRow, Weekday},
};

/// There is no duration in the export, so every video is assumed to take this long.
pub const MINUTES_PER_VIDEO: usize = 10;
pub const TOP_CHANNEL_LIMIT: usize = 10;
pub const HOURS_PER_DAY: usize = 24;

/// The selected year has no events at all. This is not a load failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("No videos found for {year}.")]
pub struct EmptyFilterResult {
    pub year: YearSelection,
}

#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters, Serialize)]
pub struct WatchStats {
    #[getset(get_copy = "pub")]
    filtered_count: usize,
    #[getset(get = "pub")]
    top_channel: Option<ChannelName>,
    #[getset(get_copy = "pub")]
    estimated_hours: usize,
    #[getset(get = "pub")]
    top_channels: Vec<ChannelCount>,
    #[getset(get = "pub")]
    heatmap: Heatmap,
    #[getset(get = "pub")]
    monthly: EnumMap<Month, usize>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ChannelCount {
    pub channel: ChannelName,
    pub count: usize,
}

/// Watch counts for every weekday and hour, including the empty cells.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Heatmap(EnumMap<Weekday, [usize; HOURS_PER_DAY]>);

impl Heatmap {
    pub fn get(&self, weekday: Weekday, hour: usize) -> usize {
        self.0[weekday][hour]
    }

    pub fn row(&self, weekday: Weekday) -> &[usize; HOURS_PER_DAY] {
        &self.0[weekday]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Weekday, usize, usize)> + '_ {
        self.0.iter().flat_map(|(weekday, hours)| {
            hours
                .iter()
                .enumerate()
                .map(move |(hour, &count)| (weekday, hour, count))
        })
    }

    pub fn max(&self) -> usize {
        self.cells().map(|(_, _, count)| count).max().unwrap_or(0)
    }
}

impl WatchStats {
    /// `top_channel` formatted for display, `-` when nothing was watched.
    pub fn top_channel_label(&self) -> &str {
        self.top_channel
            .as_ref()
            .map_or("-", |channel| AsRef::<str>::as_ref(channel))
    }

    pub fn monthly_counts(&self) -> impl Iterator<Item = (Month, usize)> + '_ {
        self.monthly.iter().map(|(month, &count)| (month, count))
    }

    pub fn from_rows(rows: &[&WatchRow]) -> Self {
        let mut channels = IndexMap::<&ChannelName, usize>::new();
        let mut heatmap = Heatmap::default();
        let mut monthly = EnumMap::<Month, usize>::default();
        for row in rows {
            *channels.entry(row.event().channel()).or_default() += 1;
            heatmap.0[row.weekday()][row.hour() as usize] += 1;
            monthly[row.month()] += 1;
        }
        // Stable sort keeps first-encountered order among equal counts.
        let ranked = channels
            .into_iter()
            .sorted_by(|x, y| y.1.cmp(&x.1))
            .map(|(channel, count)| ChannelCount {
                channel: channel.clone(),
                count,
            })
            .collect_vec();
        Self {
            filtered_count: rows.len(),
            top_channel: ranked.first().map(|x| x.channel.clone()),
            estimated_hours: estimated_hours(rows.len()),
            top_channels: ranked.into_iter().take(TOP_CHANNEL_LIMIT).collect(),
            heatmap,
            monthly,
        }
    }
}

pub fn estimated_hours(count: usize) -> usize {
    count * MINUTES_PER_VIDEO / 60
}

pub fn filter_by_year(rows: &[WatchRow], year: YearSelection) -> Vec<&WatchRow> {
    rows.iter().filter(|row| year.matches(row.year())).collect()
}

/// Keeps the first row of every `(title, channel)` pair, in order.
pub fn unique_videos<'a, I>(rows: I) -> Vec<&'a WatchRow>
where
    I: IntoIterator<Item = &'a WatchRow>,
{
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|&row| seen.insert((row.event().title(), row.event().channel())))
        .collect()
}

pub fn aggregate(
    table: &WatchEventTable,
    filter: FilterState,
) -> Result<WatchStats, EmptyFilterResult> {
    let by_year = filter_by_year(table, filter.year);
    if by_year.is_empty() {
        return Err(EmptyFilterResult { year: filter.year });
    }
    let rows = match filter.mode {
        RankingMode::TotalViews => by_year,
        RankingMode::UniqueVideos => unique_videos(by_year),
    };
    Ok(WatchStats::from_rows(&rows))
}
