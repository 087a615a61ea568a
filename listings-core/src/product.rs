//! The burger catalog: products offered by restaurants during a food event.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::distance::Coordinate;
use crate::feed::{self, FeedKind, Listings};
use crate::filter::{EvaluationContext, Filter, rules};
use crate::record::Record;

/// A burger as it appears in the feed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub restaurant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub sides_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beer_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Selectable filter values advertised by the burger feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub proteins: Vec<String>,
    #[serde(default)]
    pub beer_matches: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

/// Burger feed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFeed {
    pub burgers: Vec<RawProduct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProductMetadata>,
}

/// A burger listing. Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub restaurant: String,
    pub price: Option<f64>,
    pub protein: Option<String>,
    pub dietary_tags: BTreeSet<String>,
    pub sides_included: bool,
    pub beer_match: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub url: Option<String>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Product {
            coordinate: Coordinate::from_parts(raw.latitude, raw.longitude),
            id: raw.id,
            name: raw.name,
            restaurant: raw.restaurant,
            price: raw.price.filter(|p| p.is_finite() && *p >= 0.0),
            protein: raw.protein.filter(|p| !p.trim().is_empty()),
            dietary_tags: raw
                .dietary_restrictions
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .collect(),
            sides_included: raw.sides_included,
            beer_match: raw.beer_match.filter(|b| !b.trim().is_empty()),
            url: raw.url,
        }
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.name, self.restaurant)
    }
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        Some(self.restaurant.as_str())
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// Marker for the burger feed.
pub struct Products;

impl FeedKind for Products {
    type Payload = ProductFeed;
    type Record = Product;
    type Metadata = ProductMetadata;

    const NAME: &'static str = "burgers";

    fn into_listings(payload: ProductFeed, _now: &DateTime<Tz>) -> Listings<Product, ProductMetadata> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(payload.burgers.len());

        for raw in payload.burgers {
            if !seen.insert(raw.id.clone()) {
                warn!(id = %raw.id, "Skipping duplicate burger id");
                continue;
            }
            records.push(Product::from(raw));
        }

        let mut metadata = payload.metadata.unwrap_or_default();
        if metadata.dietary_restrictions.is_empty() {
            metadata.dietary_restrictions = feed::distinct_values(
                records
                    .iter()
                    .flat_map(|p: &Product| p.dietary_tags.iter().map(String::as_str)),
            );
        }
        if metadata.proteins.is_empty() {
            metadata.proteins =
                feed::distinct_values(records.iter().filter_map(|p: &Product| p.protein.as_deref()));
        }
        if metadata.beer_matches.is_empty() {
            metadata.beer_matches =
                feed::distinct_values(records.iter().filter_map(|p: &Product| p.beer_match.as_deref()));
        }

        let prices = || records.iter().filter_map(|p| p.price);
        if metadata.min_price.is_none() {
            metadata.min_price = prices().reduce(f64::min);
        }
        if metadata.max_price.is_none() {
            metadata.max_price = prices().reduce(f64::max);
        }

        Listings { records, metadata }
    }
}

/// Filter dimensions for burgers. At most one active filter per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    DietaryRestrictions,
    BeerMatches,
    Price,
    Protein,
    SidesIncluded,
    Favorited,
    Search,
    Distance,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductCategory::DietaryRestrictions => "dietary_restrictions",
            ProductCategory::BeerMatches => "beer_matches",
            ProductCategory::Price => "price",
            ProductCategory::Protein => "protein",
            ProductCategory::SidesIncluded => "sides_included",
            ProductCategory::Favorited => "favorited",
            ProductCategory::Search => "search",
            ProductCategory::Distance => "distance",
        };
        f.write_str(name)
    }
}

/// An active burger filter with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    /// Keep burgers sharing at least one dietary tag with the selection.
    DietaryRestrictions(BTreeSet<String>),
    BeerMatches(BTreeSet<String>),
    /// Maximum price, inclusive.
    Price(f64),
    Protein(BTreeSet<String>),
    SidesIncluded,
    Favorited(BTreeSet<String>),
    Search(String),
    Distance { radius_km: f64 },
}

impl Filter for ProductFilter {
    type Record = Product;
    type Category = ProductCategory;

    fn category(&self) -> ProductCategory {
        match self {
            ProductFilter::DietaryRestrictions(_) => ProductCategory::DietaryRestrictions,
            ProductFilter::BeerMatches(_) => ProductCategory::BeerMatches,
            ProductFilter::Price(_) => ProductCategory::Price,
            ProductFilter::Protein(_) => ProductCategory::Protein,
            ProductFilter::SidesIncluded => ProductCategory::SidesIncluded,
            ProductFilter::Favorited(_) => ProductCategory::Favorited,
            ProductFilter::Search(_) => ProductCategory::Search,
            ProductFilter::Distance { .. } => ProductCategory::Distance,
        }
    }

    fn search_query(&self) -> Option<&str> {
        match self {
            ProductFilter::Search(query) => Some(query),
            _ => None,
        }
    }

    fn keeps(&self, product: &Product, ctx: &EvaluationContext) -> bool {
        match self {
            ProductFilter::DietaryRestrictions(tags) => rules::intersects(&product.dietary_tags, tags),
            ProductFilter::BeerMatches(beers) => rules::is_member(product.beer_match.as_deref(), beers),
            ProductFilter::Price(max_price) => rules::at_most(product.price, *max_price),
            ProductFilter::Protein(proteins) => rules::is_member(product.protein.as_deref(), proteins),
            ProductFilter::SidesIncluded => product.sides_included,
            ProductFilter::Favorited(ids) => rules::is_favorited(product, ids),
            ProductFilter::Search(_) => true,
            ProductFilter::Distance { radius_km } => rules::is_nearby(product, *radius_km, ctx),
        }
    }

    fn description(&self) -> String {
        match self {
            ProductFilter::DietaryRestrictions(tags) => format!("diet: {}", rules::describe_set(tags)),
            ProductFilter::BeerMatches(beers) => format!("beer: {}", rules::describe_set(beers)),
            ProductFilter::Price(max_price) => format!("price <= {:.2}", max_price),
            ProductFilter::Protein(proteins) => format!("protein: {}", rules::describe_set(proteins)),
            ProductFilter::SidesIncluded => "sides included".to_string(),
            ProductFilter::Favorited(_) => "favorites".to_string(),
            ProductFilter::Search(query) => format!("search: \"{}\"", query),
            ProductFilter::Distance { radius_km } => format!("within {} km", radius_km),
        }
    }
}
