use chrono::NaiveDateTime;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Channel name used when a watch entry has no channel link next to it.
pub const UNKNOWN_CHANNEL: &str = "Unknown";

#[derive(
    Clone, PartialEq, Eq, Debug, TypedBuilder, CopyGetters, Getters, Serialize, Deserialize,
)]
pub struct WatchEvent {
    #[getset(get = "pub")]
    title: VideoTitle,
    #[getset(get = "pub")]
    channel: ChannelName,
    #[getset(get_copy = "pub")]
    timestamp: WatchTime,
}

#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    derive_more::From,
    derive_more::AsRef,
    derive_more::FromStr,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[as_ref(forward)]
pub struct VideoTitle(String);

#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    derive_more::From,
    derive_more::AsRef,
    derive_more::FromStr,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[as_ref(forward)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn unknown() -> Self {
        Self(UNKNOWN_CHANNEL.to_owned())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_CHANNEL
    }
}

/// Local time printed in the export, with its timezone annotation dropped.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    derive_more::From,
    derive_more::Into,
    derive_more::FromStr,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct WatchTime(NaiveDateTime);

impl WatchTime {
    /// The only date layout the export uses, e.g. `15 Jan 2024, 08:30:00`.
    pub const FORMAT: &'static str = "%d %b %Y, %H:%M:%S";

    pub fn get(self) -> NaiveDateTime {
        self.0
    }

    pub fn parse_export(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, Self::FORMAT).map(Self)
    }
}
