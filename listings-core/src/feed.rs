//! Feed payloads and their conversion into records.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{ListingsError, ListingsResult};
use crate::source::ListingSource;

/// A kind of listing feed (events, burgers): its wire payload, the records
/// it produces and the selectable filter values it advertises.
pub trait FeedKind {
    type Payload: DeserializeOwned + Serialize;
    type Record;
    type Metadata;

    /// Label used in logs and file names.
    const NAME: &'static str;

    fn into_listings(payload: Self::Payload, now: &DateTime<Tz>) -> Listings<Self::Record, Self::Metadata>;
}

/// Records plus the metadata used to populate filter choices.
#[derive(Debug, Clone)]
pub struct Listings<R, M> {
    pub records: Vec<R>,
    pub metadata: M,
}

/// Parse a raw JSON payload.
pub fn parse_payload<K: FeedKind>(json: &str) -> ListingsResult<K::Payload> {
    serde_json::from_str(json)
        .map_err(|e| ListingsError::FeedParse(format!("{} feed: {}", K::NAME, e)))
}

/// Fetch from `source` and convert into records anchored at `now`.
pub fn load<K: FeedKind>(
    source: &dyn ListingSource<K>,
    now: &DateTime<Tz>,
) -> ListingsResult<Listings<K::Record, K::Metadata>> {
    let payload = source.fetch_listings()?;
    let listings = K::into_listings(payload, now);
    info!(feed = K::NAME, records = listings.records.len(), "Loaded listings");
    Ok(listings)
}

/// Distinct, sorted, non-empty values for metadata that the payload omitted.
pub fn distinct_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    out.sort();
    out.dedup();
    out
}
