//! The shape every filterable listing shares.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::distance::Coordinate;

/// A listing entity subject to filtering.
///
/// Identity is the `id` alone: two records with the same id are the same
/// listing, even if other fields differ between fetches.
pub trait Record: Clone + fmt::Debug {
    fn id(&self) -> &str;

    /// Primary search key.
    fn name(&self) -> &str;

    /// Secondary search key (venue for events, restaurant for burgers).
    fn secondary_text(&self) -> Option<&str>;

    /// Future occurrence instants, ascending and de-duplicated.
    fn occurrences(&self) -> &[DateTime<Utc>] {
        &[]
    }

    fn coordinate(&self) -> Option<Coordinate>;
}
