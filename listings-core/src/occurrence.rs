//! Occurrence-date cleanup applied when feed items become records.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};

/// Format used when a display label has to be rebuilt from a date.
const LABEL_FORMAT: &str = "%a %b %-d";

/// Cleaned occurrence dates plus the label that matches them.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrences {
    pub dates: Vec<DateTime<Utc>>,
    pub label: String,
}

/// Parse a feed timestamp: RFC 3339, or a bare YYYY-MM-DD taken as local midnight.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Drop unparseable, past and duplicate timestamps, sort the rest ascending,
/// and reconcile the payload's label with what survived.
///
/// "Past" means strictly before `now`. The label is only rebuilt when
/// cleanup changed the date count and the payload's multiple-dates flag
/// no longer matches what is left.
pub fn normalize<Tz: TimeZone>(
    raw_dates: &[String],
    payload_label: &str,
    payload_has_multiple: bool,
    now: &DateTime<Tz>,
    tz: &Tz,
) -> Occurrences
where
    Tz::Offset: fmt::Display,
{
    let now = now.with_timezone(&Utc);

    let mut dates: Vec<DateTime<Utc>> = raw_dates
        .iter()
        .filter_map(|raw| {
            let parsed = parse_timestamp(raw, tz);
            if parsed.is_none() {
                warn!(date = %raw, "Dropping unparseable occurrence date");
            }
            parsed
        })
        .filter(|dt| *dt >= now)
        .collect();

    dates.sort();
    dates.dedup();

    let count_changed = dates.len() != raw_dates.len();
    let label = if count_changed && payload_has_multiple != (dates.len() > 1) {
        match dates.first() {
            Some(first) => {
                let rebuilt = first.with_timezone(tz).format(LABEL_FORMAT).to_string();
                debug!(
                    payload = %payload_label,
                    rebuilt = %rebuilt,
                    retained = dates.len(),
                    "Rebuilt occurrence label"
                );
                rebuilt
            }
            None => payload_label.to_string(),
        }
    } else {
        payload_label.to_string()
    };

    Occurrences { dates, label }
}
