//! Filter/query engine for event and burger listings.
//!
//! This crate provides:
//! - `event` and `product` records with their per-category filter enums
//! - `engine` for applying a filter set to a collection (structural pass, then search)
//! - `date_range` and `distance` for the calendar and geodesic math the filters use
//! - `feed`, `source` and `config` for loading listings, favorites and settings

pub mod config;
pub mod date_range;
pub mod distance;
pub mod engine;
pub mod error;
pub mod event;
pub mod feed;
pub mod filter;
pub mod occurrence;
pub mod product;
pub mod record;
pub mod source;

#[cfg(test)]
mod testing;

pub use engine::{ListingView, apply};
pub use error::{ListingsError, ListingsResult};
pub use event::{Event, EventCategory, EventFilter, Events};
pub use filter::{EvaluationContext, Filter, FilterSet};
pub use product::{Product, ProductCategory, ProductFilter, Products};
pub use record::Record;
