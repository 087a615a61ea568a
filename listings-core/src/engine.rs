//! Reduces the full record collection to the displayed collection.
//!
//! Evaluation runs in two phases. The structural pass asks every
//! non-search filter about every base record; removals accumulate in a
//! shared working set, so no filter sees another's removals and the
//! outcome does not depend on filter order. The search filter, if any,
//! then ranks the survivors once.

use tracing::debug;

use crate::filter::{EvaluationContext, Filter, FilterSet, Working, rank_by_relevance};
use crate::record::Record;

/// Apply `filters` to `records`. An empty set returns `records` unchanged.
pub fn apply<F: Filter>(
    records: &[F::Record],
    filters: &FilterSet<F>,
    ctx: &EvaluationContext,
) -> Vec<F::Record> {
    if filters.is_empty() {
        return records.to_vec();
    }

    let mut working = Working::new(records);
    for record in records {
        for filter in filters.structural() {
            filter.apply(record, &mut working, ctx);
        }
    }
    let survivors = working.into_records();

    let displayed = match filters.search_query() {
        Some(query) => rank_by_relevance(survivors, query),
        None => survivors,
    };

    debug!(
        total = records.len(),
        displayed = displayed.len(),
        filters = ?filters.descriptions(),
        "Applied filters"
    );

    displayed
}

/// The base collection, the active filters and the collection they produce.
///
/// Every mutation recomputes the displayed records. Selecting a filter
/// always replaces any filter already active in the same category.
#[derive(Debug, Clone)]
pub struct ListingView<F: Filter> {
    all: Vec<F::Record>,
    filters: FilterSet<F>,
    displayed: Vec<F::Record>,
}

impl<F: Filter> ListingView<F> {
    pub fn new(records: Vec<F::Record>) -> Self {
        ListingView {
            displayed: records.clone(),
            all: records,
            filters: FilterSet::new(),
        }
    }

    pub fn all(&self) -> &[F::Record] {
        &self.all
    }

    pub fn displayed(&self) -> &[F::Record] {
        &self.displayed
    }

    pub fn filters(&self) -> &FilterSet<F> {
        &self.filters
    }

    pub fn is_active(&self, category: F::Category) -> bool {
        self.filters.contains(category)
    }

    /// Look up a base record by id.
    pub fn record(&self, id: &str) -> Option<&F::Record> {
        self.all.iter().find(|r| r.id() == id)
    }

    /// Swap in a freshly fetched collection. Active filters are dropped.
    pub fn replace_records(&mut self, records: Vec<F::Record>, ctx: &EvaluationContext) {
        self.all = records;
        self.filters.clear();
        self.recompute(ctx);
    }

    /// Activate `filter`, displacing any filter in its category.
    pub fn select(&mut self, filter: F, ctx: &EvaluationContext) -> Option<F> {
        debug!(category = %filter.category(), filter = %filter.description(), "Selecting filter");
        let displaced = self.filters.select(filter);
        self.recompute(ctx);
        displaced
    }

    pub fn deselect(&mut self, category: F::Category, ctx: &EvaluationContext) -> Option<F> {
        let removed = self.filters.deselect(category);
        if removed.is_some() {
            debug!(%category, "Deselected filter");
            self.recompute(ctx);
        }
        removed
    }

    /// Select `filter`, or deselect its category if that exact filter is already active.
    pub fn toggle(&mut self, filter: F, ctx: &EvaluationContext) -> bool
    where
        F: PartialEq,
    {
        let category = filter.category();
        if self.filters.get(category) == Some(&filter) {
            self.deselect(category, ctx);
            false
        } else {
            self.select(filter, ctx);
            true
        }
    }

    /// Install `filter` as the search filter, or remove search when `query` is blank.
    pub fn search(&mut self, query: &str, filter: impl FnOnce(String) -> F, ctx: &EvaluationContext) {
        let query = query.trim();
        if query.is_empty() {
            let search = filter(String::new()).category();
            self.deselect(search, ctx);
        } else {
            self.select(filter(query.to_string()), ctx);
        }
    }

    pub fn clear_filters(&mut self, ctx: &EvaluationContext) {
        self.filters.clear();
        self.recompute(ctx);
    }

    /// Re-run the filters, e.g. after the clock or device location changed.
    pub fn recompute(&mut self, ctx: &EvaluationContext) {
        self.displayed = apply(&self.all, &self.filters, ctx);
    }
}
