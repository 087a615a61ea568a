use std::collections::BTreeMap;

use super::Filter;

/// Active filters, keyed by category: at most one filter per category.
///
/// Iteration follows selection order. Re-selecting a category moves it to
/// the end.
#[derive(Debug, Clone)]
pub struct FilterSet<F: Filter> {
    filters: BTreeMap<F::Category, F>,
    order: Vec<F::Category>,
}

impl<F: Filter> Default for FilterSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filter> FilterSet<F> {
    pub fn new() -> Self {
        FilterSet {
            filters: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Replace whatever filter holds `filter`'s category. Returns the one displaced.
    pub fn select(&mut self, filter: F) -> Option<F> {
        let category = filter.category();
        let previous = self.deselect(category);
        self.filters.insert(category, filter);
        self.order.push(category);
        previous
    }

    pub fn deselect(&mut self, category: F::Category) -> Option<F> {
        let removed = self.filters.remove(&category)?;
        self.order.retain(|c| *c != category);
        Some(removed)
    }

    pub fn get(&self, category: F::Category) -> Option<&F> {
        self.filters.get(&category)
    }

    pub fn contains(&self, category: F::Category) -> bool {
        self.filters.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn clear(&mut self) {
        self.filters.clear();
        self.order.clear();
    }

    pub fn categories(&self) -> &[F::Category] {
        &self.order
    }

    /// All filters, in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.order.iter().filter_map(|c| self.filters.get(c))
    }

    /// Per-record filters, i.e. everything except search.
    pub fn structural(&self) -> impl Iterator<Item = &F> {
        self.iter().filter(|f| f.search_query().is_none())
    }

    /// Query of the active search filter, if any.
    pub fn search_query(&self) -> Option<&str> {
        self.iter().find_map(|f| f.search_query())
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.iter().map(|f| f.description()).collect()
    }
}
