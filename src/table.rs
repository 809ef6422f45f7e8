use std::ops::Deref;

use chrono::{Datelike, Timelike};
use enum_iterator::Sequence;
use enum_map::Enum;
use getset::{CopyGetters, Getters};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::schema::WatchEvent;

/// Every event of one export in document order, with the calendar columns
/// derived once at construction.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WatchEventTable {
    rows: Vec<WatchRow>,
}

#[derive(Clone, PartialEq, Eq, Debug, CopyGetters, Getters, Serialize)]
pub struct WatchRow {
    #[getset(get = "pub")]
    #[serde(flatten)]
    event: WatchEvent,
    #[getset(get_copy = "pub")]
    year: i32,
    #[getset(get_copy = "pub")]
    month: Month,
    #[getset(get_copy = "pub")]
    weekday: Weekday,
    #[getset(get_copy = "pub")]
    hour: u32,
}

impl From<WatchEvent> for WatchRow {
    fn from(event: WatchEvent) -> Self {
        let time = event.timestamp().get();
        Self {
            year: time.year(),
            month: Month::from_number(time.month()),
            weekday: time.weekday().into(),
            hour: time.hour(),
            event,
        }
    }
}

impl WatchEventTable {
    pub fn new(events: Vec<WatchEvent>) -> Self {
        Self {
            rows: events.into_iter().map(WatchRow::from).collect(),
        }
    }

    /// Distinct years present in the table, newest first.
    pub fn available_years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .map(|row| row.year)
            .unique()
            .sorted_unstable_by(|x, y| y.cmp(x))
            .collect()
    }
}

impl Deref for WatchEventTable {
    type Target = [WatchRow];

    fn deref(&self) -> &[WatchRow] {
        &self.rows
    }
}

impl FromIterator<WatchEvent> for WatchEventTable {
    fn from_iter<I: IntoIterator<Item = WatchEvent>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(WatchRow::from).collect(),
        }
    }
}

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    Sequence,
    Enum,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// `number` is 1-based, as returned by `Datelike::month`, which never
    /// leaves `1..=12`.
    fn from_number(number: u32) -> Self {
        use Month::*;
        match number {
            1 => January,
            2 => February,
            3 => March,
            4 => April,
            5 => May,
            6 => June,
            7 => July,
            8 => August,
            9 => September,
            10 => October,
            11 => November,
            12 => December,
            _ => unreachable!("month number out of range: {number}"),
        }
    }
}

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    Sequence,
    Enum,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        use chrono::Weekday::*;
        match weekday {
            Mon => Weekday::Monday,
            Tue => Weekday::Tuesday,
            Wed => Weekday::Wednesday,
            Thu => Weekday::Thursday,
            Fri => Weekday::Friday,
            Sat => Weekday::Saturday,
            Sun => Weekday::Sunday,
        }
    }
}
