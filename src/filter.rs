use std::{fmt::Display, num::ParseIntError, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use typed_builder::TypedBuilder;

/// What the dashboard is currently showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, TypedBuilder, Serialize, Deserialize)]
pub struct FilterState {
    #[builder(default)]
    pub year: YearSelection,
    #[builder(default)]
    pub mode: RankingMode,
}

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Default, SerializeDisplay, DeserializeFromStr,
)]
pub enum YearSelection {
    #[default]
    AllTime,
    Year(i32),
}

impl YearSelection {
    pub fn matches(self, year: i32) -> bool {
        match self {
            YearSelection::AllTime => true,
            YearSelection::Year(selected) => selected == year,
        }
    }
}

impl Display for YearSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearSelection::AllTime => write!(f, "All Time"),
            YearSelection::Year(year) => write!(f, "{year}"),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
#[error("Expected a year or \"all\", found {input:?}: {source}")]
pub struct YearSelectionParseError {
    input: String,
    source: ParseIntError,
}

impl FromStr for YearSelection {
    type Err = YearSelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ["all", "all-time", "all time"]
            .iter()
            .any(|x| s.eq_ignore_ascii_case(x))
        {
            return Ok(YearSelection::AllTime);
        }
        s.parse()
            .map(YearSelection::Year)
            .map_err(|source| YearSelectionParseError {
                input: s.to_owned(),
                source,
            })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, ValueEnum, Serialize, Deserialize)]
pub enum RankingMode {
    /// Every watch counts, re-watches included.
    #[default]
    #[value(name = "total")]
    #[serde(rename = "total")]
    TotalViews,
    /// Only the first watch of each title on each channel counts.
    #[value(name = "unique")]
    #[serde(rename = "unique")]
    UniqueVideos,
}

impl RankingMode {
    pub fn metric_label(self) -> &'static str {
        match self {
            RankingMode::TotalViews => "Total Views",
            RankingMode::UniqueVideos => "Unique Videos",
        }
    }
}
