use log::{debug, trace};
use scraper::{ElementRef, Html};
use thiserror::Error;
use watch_wrapped_utils::selector;

use crate::{
    schema::{ChannelName, VideoTitle, WatchEvent, WatchTime},
    sibling_cursor::SiblingCursor,
};

/// Why a single candidate anchor produced no event.
///
/// These are expected for a real export and never abort the extraction.
#[derive(Debug, Error)]
pub enum CandidateSkipped {
    #[error("The video link has no title text")]
    EmptyTitle,
    #[error("No node follows the channel link")]
    MissingDateNode,
    #[error("The node after the channel link is not text")]
    DateNodeNotText,
    #[error("Could not parse watch date {text:?}: {source}")]
    InvalidDate {
        text: String,
        source: chrono::ParseError,
    },
}

pub fn extract(markup: &str) -> Vec<WatchEvent> {
    extract_from_html(&Html::parse_document(markup))
}

pub fn extract_from_html(html: &Html) -> Vec<WatchEvent> {
    let mut skipped = 0usize;
    let events: Vec<_> = iterate_video_links(html)
        .filter_map(|anchor| match parse_candidate(anchor) {
            Ok(event) => Some(event),
            Err(e) => {
                trace!("Skipped {:?}: {e}", anchor.value().attr("href"));
                skipped += 1;
                None
            }
        })
        .collect();
    debug!("Extracted {} watch events, skipped {skipped}", events.len());
    events
}

fn iterate_video_links(html: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    html.select(selector!(r#"a[href*="youtube.com/watch"]"#))
}

pub fn parse_candidate(anchor: ElementRef) -> Result<WatchEvent, CandidateSkipped> {
    let title = anchor.text().collect::<String>();
    if title.trim().is_empty() {
        return Err(CandidateSkipped::EmptyTitle);
    }

    let channel_link = SiblingCursor::after(*anchor).next_element_named("a");
    let channel = match channel_link {
        Some(link) => ChannelName::from(link.text().collect::<String>()),
        None => ChannelName::unknown(),
    };

    // Without a channel link the date sits right after the title link.
    let mut cursor = SiblingCursor::after(*channel_link.unwrap_or(anchor));
    cursor.skip_line_break();
    let date_node = cursor.next_node().ok_or(CandidateSkipped::MissingDateNode)?;
    let date_text = date_node
        .value()
        .as_text()
        .ok_or(CandidateSkipped::DateNodeNotText)?;
    let timestamp = parse_watch_time(date_text)?;

    Ok(WatchEvent::builder()
        .title(VideoTitle::from(title))
        .channel(channel)
        .timestamp(timestamp)
        .build())
}

/// Drops everything from the first `GMT` on, then parses the fixed layout.
pub fn parse_watch_time(text: &str) -> Result<WatchTime, CandidateSkipped> {
    let text = text.trim();
    let text = match text.find("GMT") {
        Some(i) => text[..i].trim(),
        None => text,
    };
    WatchTime::parse_export(text).map_err(|source| CandidateSkipped::InvalidDate {
        text: text.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{extract, parse_watch_time, CandidateSkipped};
    use crate::schema::UNKNOWN_CHANNEL;

    fn time(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn entry(video: &str, title: &str, channel: &str, date: &str) -> String {
        format!(
            r#"<div class="content-cell">Watched&nbsp;<a href="https://www.youtube.com/watch?v={video}">{title}</a><br><a href="https://www.youtube.com/channel/{channel}">{channel}</a><br>{date}<br></div>"#
        )
    }

    fn page(entries: &[String]) -> String {
        format!(
            "<html><body><div class=\"mdl-grid\">{}</div></body></html>",
            entries.join("")
        )
    }

    #[test]
    fn gmt_suffix_is_dropped() {
        assert_eq!(
            parse_watch_time("15 Jan 2024, 08:30:00 GMT+05:30").unwrap().get(),
            time(2024, 1, 15, 8, 30, 0)
        );
        assert_eq!(
            parse_watch_time("  1 Feb 2023, 17:00:01 GMT\n").unwrap().get(),
            time(2023, 2, 1, 17, 0, 1)
        );
        assert_eq!(
            parse_watch_time("29 Feb 2024, 00:00:00").unwrap().get(),
            time(2024, 2, 29, 0, 0, 0)
        );
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for text in [
            "",
            "GMT",
            "yesterday",
            "2024-01-15 08:30:00",
            "15 January 2024, 08:30:00",
            "31 Feb 2024, 08:30:00",
            "15 Jan 2024, 08:30:00 CET",
            "15 Jan 2024 GMT, 08:30:00",
        ] {
            assert!(
                matches!(
                    parse_watch_time(text),
                    Err(CandidateSkipped::InvalidDate { .. })
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn extracts_entries_in_document_order() {
        let html = page(&[
            entry("a", "First video", "Alpha", "15 Jan 2024, 08:30:00 GMT"),
            entry("b", "Second &amp; more", "Beta", "16 Jan 2024, 21:00:00 GMT+09:00"),
        ]);
        let events = extract(&html);
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].title().to_string(), "First video");
        assert_eq!(events[0].channel().to_string(), "Alpha");
        assert_eq!(events[0].timestamp().get(), time(2024, 1, 15, 8, 30, 0));

        assert_eq!(events[1].title().to_string(), "Second & more");
        assert_eq!(events[1].channel().to_string(), "Beta");
        assert_eq!(events[1].timestamp().get(), time(2024, 1, 16, 21, 0, 0));
    }

    #[test]
    fn missing_channel_keeps_the_watch_and_reads_date_after_title() {
        // A removed channel still counts as a watch, so the entry is kept under
        // the sentinel channel rather than dropped.
        let html = page(&[
            r#"<div>Watched <a href="https://www.youtube.com/watch?v=x">Removed channel video</a><br>2 Mar 2022, 10:11:12 GMT<br></div>"#.to_owned(),
        ]);
        let events = extract(&html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel().to_string(), UNKNOWN_CHANNEL);
        assert!(events[0].channel().is_unknown());
        assert_eq!(events[0].timestamp().get(), time(2022, 3, 2, 10, 11, 12));
    }

    #[test]
    fn date_directly_after_channel_without_break() {
        let html = page(&[
            r#"<div><a href="https://youtube.com/watch?v=y">Title</a> by <a href="/c">Chan</a>9 Dec 2021, 06:07:08</div>"#.to_owned(),
        ]);
        let events = extract(&html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel().to_string(), "Chan");
        assert_eq!(events[0].timestamp().get(), time(2021, 12, 9, 6, 7, 8));
    }

    #[test]
    fn only_watch_links_are_candidates() {
        let html = page(&[
            r#"<div>Visited <a href="https://www.youtube.com/channel/z">Some channel</a><br>1 Jan 2024, 00:00:00 GMT</div>"#.to_owned(),
            r#"<div>Viewed <a href="https://example.com/watch">Elsewhere</a><br><a href="/c">C</a><br>1 Jan 2024, 00:00:00 GMT</div>"#.to_owned(),
            entry("k", "Kept", "Channel", "1 Jan 2024, 00:00:00 GMT"),
        ]);
        let events = extract(&html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title().to_string(), "Kept");
    }

    #[test]
    fn bad_candidates_do_not_disturb_the_rest() {
        let html = page(&[
            entry("1", "Good one", "A", "1 Jan 2024, 01:00:00 GMT"),
            entry("2", "Bad date", "B", "sometime last week"),
            // Nothing follows the channel link.
            r#"<div><a href="https://www.youtube.com/watch?v=3">No date</a><br><a href="/c">C</a></div>"#.to_owned(),
            // An element follows the channel link instead of text.
            r#"<div><a href="https://www.youtube.com/watch?v=4">Element date</a><br><a href="/c">D</a><br><span>1 Jan 2024, 01:00:00</span></div>"#.to_owned(),
            // Empty title.
            r#"<div><a href="https://www.youtube.com/watch?v=5"> </a><br><a href="/c">E</a><br>1 Jan 2024, 01:00:00</div>"#.to_owned(),
            entry("6", "Good two", "F", "2 Jan 2024, 02:00:00 GMT"),
        ]);
        let events = extract(&html);
        let titles: Vec<_> = events.iter().map(|e| e.title().to_string()).collect();
        assert_eq!(titles, ["Good one", "Good two"]);
        for event in &events {
            assert!(!event.title().to_string().is_empty());
        }
    }

    #[test]
    fn empty_or_unrelated_markup_yields_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("<html><body><p>Nothing here</p></body></html>").is_empty());
    }
}
