use anyhow::{Result, bail};
use clap::Args;
use listings_core::source::FavoritesStore;
use listings_core::{ListingView, ProductFilter, Products};
use owo_colors::OwoColorize;

use super::Session;
use super::events::to_set;
use crate::render;

#[derive(Args)]
pub struct BurgerArgs {
    /// Search burger names and restaurants
    #[arg(short, long)]
    search: Option<String>,

    /// Only burgers tagged with any of these dietary restrictions (repeatable)
    #[arg(long = "diet", value_name = "TAG")]
    diets: Vec<String>,

    /// Only burgers paired with this beer (repeatable)
    #[arg(long = "beer", value_name = "BEER")]
    beers: Vec<String>,

    /// Maximum price, inclusive
    #[arg(long, value_name = "PRICE")]
    max_price: Option<f64>,

    /// Only burgers with this protein (repeatable)
    #[arg(long = "protein", value_name = "PROTEIN")]
    proteins: Vec<String>,

    /// Only burgers that come with sides
    #[arg(long)]
    sides: bool,

    /// Only favorited burgers
    #[arg(long)]
    favorites: bool,

    /// Only burgers within this many km (configured default if no value)
    #[arg(long, value_name = "KM")]
    within: Option<Option<f64>>,
}

impl BurgerArgs {
    fn filters(&self, session: &Session) -> Result<Vec<ProductFilter>> {
        let mut filters = Vec::new();

        if !self.diets.is_empty() {
            filters.push(ProductFilter::DietaryRestrictions(to_set(&self.diets)));
        }
        if !self.beers.is_empty() {
            filters.push(ProductFilter::BeerMatches(to_set(&self.beers)));
        }
        if let Some(max_price) = self.max_price {
            if !max_price.is_finite() || max_price < 0.0 {
                bail!("--max-price must be a non-negative number");
            }
            filters.push(ProductFilter::Price(max_price));
        }
        if !self.proteins.is_empty() {
            filters.push(ProductFilter::Protein(to_set(&self.proteins)));
        }
        if self.sides {
            filters.push(ProductFilter::SidesIncluded);
        }
        if self.favorites {
            filters.push(ProductFilter::Favorited(session.favorites.get()?));
        }
        if let Some(radius_km) = session.radius(self.within)? {
            filters.push(ProductFilter::Distance { radius_km });
        }

        Ok(filters)
    }
}

pub fn run(session: &Session, args: BurgerArgs) -> Result<()> {
    let ctx = session.context();
    let listings = session.load_feed::<Products>(&session.config.burgers_feed_path(), &ctx)?;

    let mut view: ListingView<ProductFilter> = ListingView::new(listings.records);
    for filter in args.filters(session)? {
        view.select(filter, &ctx);
    }
    if let Some(query) = &args.search {
        view.search(query, ProductFilter::Search, &ctx);
    }

    if view.displayed().is_empty() {
        println!("{}", "No burgers found".dimmed());
        return Ok(());
    }

    let favorites = session.favorites.get()?;
    for line in render::product_lines(view.displayed(), &favorites, &ctx) {
        println!("{}", line);
    }

    render::print_summary(view.displayed().len(), view.all().len(), &view.filters().descriptions());

    Ok(())
}
