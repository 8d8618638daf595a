//! Date grouping for record lists.
//!
//! Reports and prescriptions render as day buckets, newest day first. The
//! fetched order is never mutated: records are cloned into groups, and a
//! record whose date field cannot be parsed is left out of the grouping
//! without failing the whole list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// A record that carries an event date in wire form.
pub trait Dated {
    /// The raw date field, e.g. `2025-10-02T09:30:00.000+00:00` or
    /// `2025-10-02`. `None` when the backend omitted it.
    fn event_date(&self) -> Option<&str>;
}

/// One calendar-day bucket of records.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<T> {
    pub date: NaiveDate,
    /// Human form of `date`, e.g. `Oct 02, 2025`.
    pub display_date: String,
    pub records: Vec<T>,
}

/// Parse a wire date into a timestamp usable for ordering.
///
/// Accepts RFC 3339 timestamps (the Java services serialize `Date` that way)
/// and bare `YYYY-MM-DD` values, which sort as midnight.
pub fn parse_event_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Group records into calendar-day buckets, newest day first.
///
/// The input is sorted newest-first by the parsed date before bucketing
/// (stable, so same-day records keep their fetched order), then split on the
/// calendar date. Idempotent: flattening the result and regrouping it
/// reproduces identical groups.
pub fn group_by_date<T: Dated + Clone>(records: &[T]) -> Vec<DateGroup<T>> {
    let mut dated: Vec<(NaiveDateTime, T)> = records
        .iter()
        .filter_map(|record| {
            let raw = record.event_date()?;
            let parsed = parse_event_datetime(raw);
            if parsed.is_none() {
                tracing::debug!(date = raw, "skipping record with unparsable date");
            }
            Some((parsed?, record.clone()))
        })
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups: Vec<DateGroup<T>> = Vec::new();
    for (timestamp, record) in dated {
        let date = timestamp.date();
        match groups.last_mut() {
            Some(group) if group.date == date => group.records.push(record),
            _ => groups.push(DateGroup {
                date,
                display_date: format_display_date(date),
                records: vec![record],
            }),
        }
    }
    groups
}

/// Flatten day buckets back into a single record sequence.
pub fn flatten<T: Clone>(groups: &[DateGroup<T>]) -> Vec<T> {
    groups
        .iter()
        .flat_map(|group| group.records.iter().cloned())
        .collect()
}

fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}
