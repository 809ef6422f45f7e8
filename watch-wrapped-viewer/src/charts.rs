use std::ops::Range;

use svg::{
    node::element::{Line, Rectangle, Text},
    Document,
};
use watch_wrapped::{
    stats::{Heatmap, HOURS_PER_DAY},
    table::Weekday,
};

/// Stops of the viridis color scale, low to high.
const VIRIDIS: [(f64, f64, f64); 5] = [
    (68.0, 1.0, 84.0),
    (59.0, 82.0, 139.0),
    (33.0, 145.0, 140.0),
    (94.0, 201.0, 98.0),
    (253.0, 231.0, 37.0),
];
const BAR_COLOR: &str = "#ff4b4b";

/// One bar per entry, top to bottom, for labels that may be long.
pub fn horizontal_bars(entries: &[(String, usize)]) -> Document {
    let (label_width, bar_width, row_height) = (220.0, 400.0, 26.0);
    let (w, h) = (label_width + bar_width + 60.0, row_height * entries.len().max(1) as f64);
    let max = entries.iter().map(|x| x.1).max().unwrap_or(0).max(1) as f64;
    let mut document = Document::new().set("viewBox", (0, 0, w, h));
    for (i, (label, count)) in entries.iter().enumerate() {
        let y = i as f64 * row_height;
        let width = map_float(*count as f64, 0.0..max, 0.0..bar_width);
        document = document
            .add(
                Text::new(label.clone())
                    .set("x", label_width - 8.0)
                    .set("y", y + row_height / 2.0)
                    .set("text-anchor", "end")
                    .set("dominant-baseline", "central")
                    .set("font-size", 12),
            )
            .add(
                Rectangle::new()
                    .set("class", "bar")
                    .set("x", label_width)
                    .set("y", y + 3.0)
                    .set("width", width)
                    .set("height", row_height - 6.0)
                    .set("fill", BAR_COLOR),
            )
            .add(
                Text::new(count.to_string())
                    .set("x", label_width + width + 6.0)
                    .set("y", y + row_height / 2.0)
                    .set("dominant-baseline", "central")
                    .set("font-size", 12),
            );
    }
    document
}

/// One column per entry, left to right, keeping the given order.
pub fn vertical_bars(entries: &[(String, usize)]) -> Document {
    let (w, h, margin) = (720.0, 300.0, 40.0);
    let max = entries.iter().map(|x| x.1).max().unwrap_or(0).max(1) as f64;
    let slot = (w - 2.0 * margin) / entries.len().max(1) as f64;
    let y_range = h - margin..margin / 2.0;
    let mut document = Document::new().set("viewBox", (0, 0, w, h)).add(
        Line::new()
            .set("x1", margin)
            .set("x2", w - margin)
            .set("y1", y_range.start)
            .set("y2", y_range.start)
            .set("stroke", "#888")
            .set("stroke-width", 0.5),
    );
    for (i, (label, count)) in entries.iter().enumerate() {
        let x = margin + i as f64 * slot;
        let top = map_float(*count as f64, 0.0..max, y_range.clone());
        document = document
            .add(
                Rectangle::new()
                    .set("class", "bar")
                    .set("x", x + slot * 0.15)
                    .set("y", top)
                    .set("width", slot * 0.7)
                    .set("height", y_range.start - top)
                    .set("fill", BAR_COLOR),
            )
            .add(
                Text::new(count.to_string())
                    .set("x", x + slot / 2.0)
                    .set("y", top - 4.0)
                    .set("text-anchor", "middle")
                    .set("font-size", 11),
            )
            .add(
                Text::new(label.clone())
                    .set("font-size", 11)
                    .set("text-anchor", "middle")
                    .set("x", x + slot / 2.0)
                    .set("y", y_range.start + 16.0),
            );
    }
    document
}

/// Weekdays as rows, hours as columns.
pub fn heatmap(heatmap: &Heatmap) -> Document {
    let (cell, left, top) = (26.0, 90.0, 24.0);
    let (w, h) = (left + cell * HOURS_PER_DAY as f64 + 10.0, top + cell * 7.0 + 10.0);
    let max = heatmap.max().max(1) as f64;
    let mut document = Document::new().set("viewBox", (0, 0, w, h));
    for hour in 0..HOURS_PER_DAY {
        document = document.add(
            Text::new(hour.to_string())
                .set("x", left + (hour as f64 + 0.5) * cell)
                .set("y", top - 8.0)
                .set("text-anchor", "middle")
                .set("font-size", 10),
        );
    }
    for (row, weekday) in enum_iterator::all::<Weekday>().enumerate() {
        let y = top + row as f64 * cell;
        document = document.add(
            Text::new(weekday.to_string())
                .set("x", left - 8.0)
                .set("y", y + cell / 2.0)
                .set("text-anchor", "end")
                .set("dominant-baseline", "central")
                .set("font-size", 11),
        );
        for (hour, &count) in heatmap.row(weekday).iter().enumerate() {
            document = document.add(
                Rectangle::new()
                    .set("class", "cell")
                    .set("x", left + hour as f64 * cell)
                    .set("y", y)
                    .set("width", cell - 1.0)
                    .set("height", cell - 1.0)
                    .set("fill", viridis(count as f64 / max))
                    .set("data-count", count.to_string()),
            );
        }
    }
    document
}

/// `t` is clamped to `0.0..=1.0`.
fn viridis(t: f64) -> String {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let i = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = t - i as f64;
    let (lo, hi) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let mix = |a: f64, b: f64| (a + (b - a) * frac).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(lo.0, hi.0),
        mix(lo.1, hi.1),
        mix(lo.2, hi.2)
    )
}

fn map_float(a: f64, src: Range<f64>, dst: Range<f64>) -> f64 {
    dst.start + (dst.end - dst.start) * (a - src.start) / (src.end - src.start)
}
