//! Presentation-facing projections of the row set.
//!
//! # Responsibility
//! - Render the backup document and the plain-text report consumed by
//!   external exporters.
//! - Shape raw rows into per-event chart series for the display renderer.
//!
//! # Invariants
//! - Report rows are ordered most recent first; chart points ascend.
//! - Rendering never mutates or persists anything.

use crate::journal::grouper::group_entries;
use crate::model::event::{EventRow, Severity};
use crate::model::timestamp::EntryTimestamp;
use crate::store::codec::encode_document;
use std::collections::BTreeMap;

/// Renders the full backup document in the on-disk layout, rows in the
/// given order.
pub fn render_csv(rows: &[EventRow]) -> String {
    encode_document(rows)
}

/// Renders the plain-text report body: one block per row, most recent
/// entry first, rows inside an entry in insertion order.
pub fn render_report(rows: &[EventRow]) -> String {
    let mut report = String::new();
    for entry in group_entries(rows) {
        for row in &entry.rows {
            report.push_str(&format!(
                "{} - {} (Severity: {})\nNotes: {}\n{}\n",
                row.timestamp,
                row.event_name,
                row.severity,
                row.note,
                "-".repeat(30)
            ));
        }
    }
    report
}

/// One charted point: an entry timestamp and the severity logged there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub timestamp: EntryTimestamp,
    pub severity: Severity,
}

/// One chart series: every logged occurrence of a single event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub event_name: String,
    /// Points in ascending timestamp order.
    pub points: Vec<ChartPoint>,
}

/// Builds one series per distinct event name, names in sorted order,
/// points ascending by timestamp.
pub fn chart_series(rows: &[EventRow]) -> Vec<ChartSeries> {
    let mut by_event: BTreeMap<String, Vec<ChartPoint>> = BTreeMap::new();
    for row in rows {
        by_event.entry(row.event_name.clone()).or_default().push(ChartPoint {
            timestamp: row.timestamp,
            severity: row.severity,
        });
    }

    by_event
        .into_iter()
        .map(|(event_name, mut points)| {
            points.sort_by_key(|point| point.timestamp);
            ChartSeries { event_name, points }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{chart_series, render_csv, render_report};
    use crate::model::event::{EventCategory, EventRow, Severity};
    use crate::model::timestamp::EntryTimestamp;

    fn row(ts: &str, name: &str, severity: u8, note: &str) -> EventRow {
        EventRow {
            timestamp: EntryTimestamp::parse(ts).expect("fixed timestamp"),
            event_name: name.to_string(),
            category: EventCategory::Other,
            severity: Severity::new(severity).expect("valid severity"),
            note: note.to_string(),
        }
    }

    #[test]
    fn csv_projection_uses_store_layout() {
        let document = render_csv(&[row("2025-03-14 09:26", "Fatigue", 7, "tired")]);
        let mut lines = document.lines();
        assert_eq!(lines.next(), Some("Date,Event,Type,Severity,Notes"));
        assert_eq!(lines.next(), Some("2025-03-14 09:26,Fatigue,Other,7,tired"));
    }

    #[test]
    fn report_orders_most_recent_entry_first() {
        let report = render_report(&[
            row("2025-03-13 08:00", "Fatigue", 5, "older"),
            row("2025-03-15 18:00", "Stress", 4, "newer"),
        ]);
        let newer = report.find("Stress").expect("newer row present");
        let older = report.find("Fatigue").expect("older row present");
        assert!(newer < older);
        assert!(report.contains("Stress (Severity: 4)"));
        assert!(report.contains("Notes: older"));
    }

    #[test]
    fn chart_series_splits_by_event_and_sorts_points_ascending() {
        let series = chart_series(&[
            row("2025-03-15 18:00", "Fatigue", 8, ""),
            row("2025-03-13 08:00", "Fatigue", 5, ""),
            row("2025-03-14 09:26", "Stress", 4, ""),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].event_name, "Fatigue");
        let severities: Vec<u8> = series[0]
            .points
            .iter()
            .map(|point| point.severity.get())
            .collect();
        assert_eq!(severities, vec![5, 8]);
        assert_eq!(series[1].event_name, "Stress");
    }
}
