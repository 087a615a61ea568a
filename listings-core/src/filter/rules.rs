//! Predicates shared by the event and product filter kinds.
//!
//! Every rule fails closed: a record without the attribute being examined
//! is dropped.

use std::collections::BTreeSet;

use super::EvaluationContext;
use crate::date_range::DateRange;
use crate::distance;
use crate::record::Record;

/// At least one occurrence lands on a day inside `range`.
pub fn occurs_within<R: Record>(record: &R, range: &DateRange, ctx: &EvaluationContext) -> bool {
    let tz = ctx.timezone();
    record
        .occurrences()
        .iter()
        .any(|instant| range.contains_instant(instant, &tz))
}

/// Exact-match set membership.
pub fn is_member(value: Option<&str>, selected: &BTreeSet<String>) -> bool {
    value.is_some_and(|v| selected.contains(v))
}

/// At least one shared tag.
pub fn intersects(tags: &BTreeSet<String>, selected: &BTreeSet<String>) -> bool {
    !tags.is_disjoint(selected)
}

pub fn is_favorited<R: Record>(record: &R, favorites: &BTreeSet<String>) -> bool {
    favorites.contains(record.id())
}

/// Record lies within `radius_km` of the device's current location.
pub fn is_nearby<R: Record>(record: &R, radius_km: f64, ctx: &EvaluationContext) -> bool {
    distance::within_radius(ctx.location, record.coordinate(), radius_km)
}

pub fn at_most(value: Option<f64>, ceiling: f64) -> bool {
    value.is_some_and(|v| v <= ceiling)
}

/// Render a value set for filter descriptions.
pub fn describe_set(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}
