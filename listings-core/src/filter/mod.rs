//! Filter predicates and the per-category filter set.
//!
//! A filter is one keep/drop rule tagged with a category. Each record kind
//! (events, burgers) has its own closed enum of filters; the engine is
//! generic over the [`Filter`] trait and never inspects payloads itself.

mod context;
pub mod rules;
mod search;
mod set;
mod working;

use std::fmt;
use std::hash::Hash;

use crate::record::Record;

pub use context::EvaluationContext;
pub use search::rank_by_relevance;
pub use set::FilterSet;
pub use working::Working;

/// A single predicate over one record kind.
pub trait Filter: Clone + fmt::Debug {
    type Record: Record;
    type Category: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display;

    fn category(&self) -> Self::Category;

    /// Query text when this is the search filter. Search filters are skipped
    /// by the structural pass and run once over the survivors instead.
    fn search_query(&self) -> Option<&str> {
        None
    }

    /// Whether `record` survives this filter.
    fn keeps(&self, record: &Self::Record, ctx: &EvaluationContext) -> bool;

    /// Remove `record` from `working` if it fails this filter.
    /// Never re-adds, reorders or touches the record.
    fn apply<'a>(
        &self,
        record: &'a Self::Record,
        working: &mut Working<'a, Self::Record>,
        ctx: &EvaluationContext,
    ) {
        if !self.keeps(record, ctx) {
            working.remove(record.id());
        }
    }

    /// Short human-readable summary, e.g. `price <= 12.00`.
    fn description(&self) -> String;
}
