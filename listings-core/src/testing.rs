//! Minimal record and filter kinds for exercising the generic machinery.

use std::fmt;

use crate::distance::Coordinate;
use crate::filter::{EvaluationContext, Filter};
use crate::record::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub secondary: Option<String>,
}

impl Item {
    pub fn named(id: &str, name: &str) -> Self {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, text: &str) -> Self {
        self.secondary = Some(text.to_string());
        self
    }
}

impl Record for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemCategory {
    A,
    B,
    Search,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Keeps only the listed ids, or searches.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemFilter {
    Ids(ItemCategory, Vec<String>),
    Search(String),
}

impl ItemFilter {
    pub fn ids(category: ItemCategory, ids: &[&str]) -> Self {
        ItemFilter::Ids(category, ids.iter().map(|s| s.to_string()).collect())
    }
}

impl Filter for ItemFilter {
    type Record = Item;
    type Category = ItemCategory;

    fn category(&self) -> ItemCategory {
        match self {
            ItemFilter::Ids(category, _) => *category,
            ItemFilter::Search(_) => ItemCategory::Search,
        }
    }

    fn search_query(&self) -> Option<&str> {
        match self {
            ItemFilter::Search(query) => Some(query),
            _ => None,
        }
    }

    fn keeps(&self, record: &Item, _ctx: &EvaluationContext) -> bool {
        match self {
            ItemFilter::Ids(_, ids) => ids.iter().any(|id| id == &record.id),
            ItemFilter::Search(_) => true,
        }
    }

    fn description(&self) -> String {
        match self {
            ItemFilter::Ids(category, ids) => format!("{} in [{}]", category, ids.join(", ")),
            ItemFilter::Search(query) => format!("search \"{}\"", query),
        }
    }
}
