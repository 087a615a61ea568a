//! Event listings (concerts, festivals, food events) and their filters.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date_range::{DateRange, QuickDate};
use crate::distance::Coordinate;
use crate::feed::{self, FeedKind, Listings};
use crate::filter::{EvaluationContext, Filter, rules};
use crate::occurrence;
use crate::record::Record;

/// An event as it appears in the feed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub date_label: String,
    #[serde(default)]
    pub has_multiple_dates: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Selectable filter values advertised by the event feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub event_types: Vec<String>,
}

/// Event feed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFeed {
    pub events: Vec<RawEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// A cleaned-up event listing. Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub venue: String,
    pub source: String,
    pub event_type: Option<String>,
    pub dates: Vec<DateTime<Utc>>,
    pub date_label: String,
    pub coordinate: Option<Coordinate>,
    pub url: Option<String>,
}

impl Event {
    /// Convert a payload item, dropping past and duplicate dates.
    pub fn from_raw(raw: RawEvent, now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let occurrences = occurrence::normalize(
            &raw.dates,
            &raw.date_label,
            raw.has_multiple_dates,
            now,
            &tz,
        );

        Event {
            coordinate: Coordinate::from_parts(raw.latitude, raw.longitude),
            id: raw.id,
            name: raw.name,
            venue: raw.venue,
            source: raw.source,
            event_type: raw.event_type.filter(|t| !t.trim().is_empty()),
            dates: occurrences.dates,
            date_label: occurrences.label,
            url: raw.url,
        }
    }

    pub fn first_date(&self) -> Option<&DateTime<Utc>> {
        self.dates.first()
    }

    pub fn has_multiple_dates(&self) -> bool {
        self.dates.len() > 1
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.name, self.venue)
    }
}

impl Record for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        Some(self.venue.as_str())
    }

    fn occurrences(&self) -> &[DateTime<Utc>] {
        &self.dates
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// Marker for the event feed.
pub struct Events;

impl FeedKind for Events {
    type Payload = EventFeed;
    type Record = Event;
    type Metadata = EventMetadata;

    const NAME: &'static str = "events";

    fn into_listings(payload: EventFeed, now: &DateTime<Tz>) -> Listings<Event, EventMetadata> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(payload.events.len());

        for raw in payload.events {
            if !seen.insert(raw.id.clone()) {
                warn!(id = %raw.id, "Skipping duplicate event id");
                continue;
            }
            records.push(Event::from_raw(raw, now));
        }

        let mut metadata = payload.metadata.unwrap_or_default();
        if metadata.sources.is_empty() {
            metadata.sources = feed::distinct_values(records.iter().map(|e: &Event| e.source.as_str()));
        }
        if metadata.event_types.is_empty() {
            metadata.event_types =
                feed::distinct_values(records.iter().filter_map(|e: &Event| e.event_type.as_deref()));
        }

        Listings { records, metadata }
    }
}

/// Filter dimensions for events. At most one active filter per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    QuickDate,
    Date,
    Source,
    EventType,
    OneOf,
    MultipleDates,
    Favorited,
    Search,
    Distance,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCategory::QuickDate => "quick_date",
            EventCategory::Date => "date",
            EventCategory::Source => "source",
            EventCategory::EventType => "event_type",
            EventCategory::OneOf => "one_of",
            EventCategory::MultipleDates => "multiple_dates",
            EventCategory::Favorited => "favorited",
            EventCategory::Search => "search",
            EventCategory::Distance => "distance",
        };
        f.write_str(name)
    }
}

/// An active event filter with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EventFilter {
    /// Relative date bucket, resolved against the evaluation clock.
    QuickDate(QuickDate),
    /// Explicit inclusive day range.
    Date(DateRange),
    Source(BTreeSet<String>),
    EventType(BTreeSet<String>),
    /// Only events with at most one date.
    OneOf,
    /// Only events with more than one date.
    MultipleDates,
    /// Snapshot of favorited ids taken at selection time.
    Favorited(BTreeSet<String>),
    Search(String),
    Distance { radius_km: f64 },
}

impl Filter for EventFilter {
    type Record = Event;
    type Category = EventCategory;

    fn category(&self) -> EventCategory {
        match self {
            EventFilter::QuickDate(_) => EventCategory::QuickDate,
            EventFilter::Date(_) => EventCategory::Date,
            EventFilter::Source(_) => EventCategory::Source,
            EventFilter::EventType(_) => EventCategory::EventType,
            EventFilter::OneOf => EventCategory::OneOf,
            EventFilter::MultipleDates => EventCategory::MultipleDates,
            EventFilter::Favorited(_) => EventCategory::Favorited,
            EventFilter::Search(_) => EventCategory::Search,
            EventFilter::Distance { .. } => EventCategory::Distance,
        }
    }

    fn search_query(&self) -> Option<&str> {
        match self {
            EventFilter::Search(query) => Some(query),
            _ => None,
        }
    }

    fn keeps(&self, event: &Event, ctx: &EvaluationContext) -> bool {
        match self {
            EventFilter::QuickDate(bucket) => {
                rules::occurs_within(event, &bucket.resolve(ctx.today()), ctx)
            }
            EventFilter::Date(range) => rules::occurs_within(event, range, ctx),
            EventFilter::Source(sources) => rules::is_member(Some(event.source.as_str()), sources),
            EventFilter::EventType(types) => rules::is_member(event.event_type.as_deref(), types),
            EventFilter::OneOf => event.dates.len() <= 1,
            EventFilter::MultipleDates => event.dates.len() > 1,
            EventFilter::Favorited(ids) => rules::is_favorited(event, ids),
            EventFilter::Search(_) => true,
            EventFilter::Distance { radius_km } => rules::is_nearby(event, *radius_km, ctx),
        }
    }

    fn description(&self) -> String {
        match self {
            EventFilter::QuickDate(bucket) => format!("date: {}", bucket),
            EventFilter::Date(range) => format!("date: {}", range),
            EventFilter::Source(sources) => format!("source: {}", rules::describe_set(sources)),
            EventFilter::EventType(types) => format!("type: {}", rules::describe_set(types)),
            EventFilter::OneOf => "single date only".to_string(),
            EventFilter::MultipleDates => "multiple dates only".to_string(),
            EventFilter::Favorited(_) => "favorites".to_string(),
            EventFilter::Search(query) => format!("search: \"{}\"", query),
            EventFilter::Distance { radius_km } => format!("within {} km", radius_km),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Denver;

    fn now() -> DateTime<Tz> {
        Denver.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap()
    }

    fn ctx() -> EvaluationContext {
        EvaluationContext::new(now(), Some(Coordinate::new(43.6150, -116.2023)))
    }

    fn raw(id: &str, name: &str, dates: &[&str]) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            name: name.to_string(),
            venue: "Knitting Factory".to_string(),
            source: "knitting_factory".to_string(),
            event_type: Some("Concert".to_string()),
            dates: dates.iter().map(|s| s.to_string()).collect(),
            date_label: String::new(),
            has_multiple_dates: dates.len() > 1,
            latitude: Some(43.6141),
            longitude: Some(-116.2034),
            url: None,
        }
    }

    fn event(id: &str, dates: &[&str]) -> Event {
        Event::from_raw(raw(id, id, dates), &now())
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identity_is_id_only() {
        let a = event("a", &["2025-03-20T20:00:00Z"]);
        let mut b = a.clone();
        b.name = "Renamed".to_string();
        b.dates.clear();
        assert_eq!(a, b);
        assert_ne!(a, event("b", &[]));
    }

    #[test]
    fn explicit_range_keeps_end_day_at_any_time() {
        // Late evening on the 22nd in Denver (04:30Z on the 23rd)
        let e = event("a", &["2025-03-23T04:30:00Z"]);
        let range = DateRange::new(
            chrono::NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 22).unwrap(),
        );
        assert!(EventFilter::Date(range).keeps(&e, &ctx()));
    }

    #[test]
    fn date_filters_drop_events_without_dates() {
        let e = event("a", &[]);
        assert!(!EventFilter::QuickDate(QuickDate::ThisMonth).keeps(&e, &ctx()));
    }

    #[test]
    fn quick_date_resolves_against_clock() {
        let saturday = event("a", &["2025-03-22T20:00:00Z"]);
        let next_month = event("b", &["2025-04-10T20:00:00Z"]);

        let weekend = EventFilter::QuickDate(QuickDate::ThisWeekend);
        assert!(weekend.keeps(&saturday, &ctx()));
        assert!(!weekend.keeps(&next_month, &ctx()));

        let april = EventFilter::QuickDate(QuickDate::NextMonth);
        assert!(april.keeps(&next_month, &ctx()));
    }

    #[test]
    fn multiple_dates_match_if_any_occurrence_is_in_range() {
        let e = event("a", &["2025-03-20T20:00:00Z", "2025-04-10T20:00:00Z"]);
        assert!(EventFilter::QuickDate(QuickDate::NextMonth).keeps(&e, &ctx()));
        assert!(EventFilter::QuickDate(QuickDate::Tomorrow).keeps(&e, &ctx()));
    }

    #[test]
    fn occurrence_count_filters() {
        let none = event("a", &[]);
        let one = event("b", &["2025-03-20T20:00:00Z"]);
        let two = event("c", &["2025-03-20T20:00:00Z", "2025-03-21T20:00:00Z"]);

        assert!(EventFilter::OneOf.keeps(&none, &ctx()));
        assert!(EventFilter::OneOf.keeps(&one, &ctx()));
        assert!(!EventFilter::OneOf.keeps(&two, &ctx()));

        assert!(!EventFilter::MultipleDates.keeps(&one, &ctx()));
        assert!(EventFilter::MultipleDates.keeps(&two, &ctx()));
    }

    #[test]
    fn source_and_type_membership() {
        let mut e = event("a", &[]);
        assert!(EventFilter::Source(set(&["knitting_factory"])).keeps(&e, &ctx()));
        assert!(!EventFilter::Source(set(&["treefort"])).keeps(&e, &ctx()));
        assert!(EventFilter::EventType(set(&["Concert", "Festival"])).keeps(&e, &ctx()));

        e.event_type = None;
        assert!(!EventFilter::EventType(set(&["Concert"])).keeps(&e, &ctx()));
    }

    #[test]
    fn favorited_uses_snapshot() {
        let e = event("a", &[]);
        assert!(EventFilter::Favorited(set(&["a", "z"])).keeps(&e, &ctx()));
        assert!(!EventFilter::Favorited(set(&["z"])).keeps(&e, &ctx()));
    }

    #[test]
    fn distance_fails_closed_without_coordinate() {
        let mut e = event("a", &[]);
        assert!(EventFilter::Distance { radius_km: 5.0 }.keeps(&e, &ctx()));

        e.coordinate = None;
        for radius_km in [0.0, 5.0, 1_000_000.0] {
            assert!(!EventFilter::Distance { radius_km }.keeps(&e, &ctx()));
        }
    }

    #[test]
    fn categories_map_one_to_one() {
        let filters = [
            EventFilter::QuickDate(QuickDate::Today),
            EventFilter::Date(DateRange::day(now().date_naive())),
            EventFilter::Source(BTreeSet::new()),
            EventFilter::EventType(BTreeSet::new()),
            EventFilter::OneOf,
            EventFilter::MultipleDates,
            EventFilter::Favorited(BTreeSet::new()),
            EventFilter::Search("x".to_string()),
            EventFilter::Distance { radius_km: 1.0 },
        ];
        let categories: BTreeSet<EventCategory> = filters.iter().map(|f| f.category()).collect();
        assert_eq!(categories.len(), filters.len());
    }

    #[test]
    fn feed_conversion_fills_metadata_and_skips_duplicate_ids() {
        let mut festival = raw("b", "Treefort", &["2025-03-27T18:00:00Z"]);
        festival.source = "treefort".to_string();
        festival.event_type = Some("Festival".to_string());

        let payload = EventFeed {
            events: vec![
                raw("a", "Show", &["2025-03-20T20:00:00Z"]),
                festival,
                raw("a", "Show again", &[]),
            ],
            metadata: None,
        };

        let listings = Events::into_listings(payload, &now());

        assert_eq!(listings.records.len(), 2);
        assert_eq!(listings.records[0].name, "Show");
        assert_eq!(listings.metadata.sources, vec!["knitting_factory", "treefort"]);
        assert_eq!(listings.metadata.event_types, vec!["Concert", "Festival"]);
    }

    #[test]
    fn feed_payload_parses_camel_case_json() {
        let json = r#"{
            "events": [{
                "id": "evt-1",
                "name": "Built to Spill",
                "venue": "Knitting Factory",
                "source": "knitting_factory",
                "eventType": "Concert",
                "dates": ["2025-03-21T03:00:00Z"],
                "dateLabel": "Thu Mar 20",
                "hasMultipleDates": false,
                "latitude": 43.6141,
                "longitude": -116.2034
            }],
            "metadata": { "sources": ["knitting_factory"], "eventTypes": ["Concert"] }
        }"#;

        let payload = feed::parse_payload::<Events>(json).unwrap();
        let listings = Events::into_listings(payload, &now());
        let e = &listings.records[0];

        assert_eq!(e.event_type.as_deref(), Some("Concert"));
        assert_eq!(e.date_label, "Thu Mar 20");
        assert!(e.coordinate.is_some());
    }
}
