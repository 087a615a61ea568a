use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Args;
use listings_core::date_range::{DateRange, QuickDate};
use listings_core::source::FavoritesStore;
use listings_core::{EventFilter, Events, ListingView};
use owo_colors::OwoColorize;

use super::Session;
use crate::render;

#[derive(Args)]
pub struct EventArgs {
    /// Search event names and venues
    #[arg(short, long)]
    search: Option<String>,

    /// Relative date: today, tomorrow, this-week, this-weekend, next-week, this-month, next-month
    #[arg(long, conflicts_with = "from")]
    when: Option<QuickDate>,

    /// Show events from this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Show events until this date (YYYY-MM-DD), inclusive
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Only events from this source (repeatable)
    #[arg(long = "source", value_name = "SOURCE")]
    sources: Vec<String>,

    /// Only events of this type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Only events with a single date
    #[arg(long, conflicts_with = "multiple_dates")]
    single_date: bool,

    /// Only events with more than one date
    #[arg(long)]
    multiple_dates: bool,

    /// Only favorited events
    #[arg(long)]
    favorites: bool,

    /// Only events within this many km (configured default if no value)
    #[arg(long, value_name = "KM")]
    within: Option<Option<f64>>,
}

impl EventArgs {
    fn filters(&self, session: &Session) -> Result<Vec<EventFilter>> {
        let mut filters = Vec::new();

        if let Some(bucket) = self.when {
            filters.push(EventFilter::QuickDate(bucket));
        }
        if let Some(from) = &self.from {
            let range = DateRange::from_args(from, self.to.as_deref())?;
            if range.end < range.start {
                bail!("--to ({}) is before --from ({})", range.end, range.start);
            }
            filters.push(EventFilter::Date(range));
        }
        if !self.sources.is_empty() {
            filters.push(EventFilter::Source(to_set(&self.sources)));
        }
        if !self.types.is_empty() {
            filters.push(EventFilter::EventType(to_set(&self.types)));
        }
        if self.single_date {
            filters.push(EventFilter::OneOf);
        }
        if self.multiple_dates {
            filters.push(EventFilter::MultipleDates);
        }
        if self.favorites {
            filters.push(EventFilter::Favorited(session.favorites.get()?));
        }
        if let Some(radius_km) = session.radius(self.within)? {
            filters.push(EventFilter::Distance { radius_km });
        }

        Ok(filters)
    }
}

pub fn run(session: &Session, args: EventArgs) -> Result<()> {
    let ctx = session.context();
    let listings = session.load_feed::<Events>(&session.config.events_feed_path(), &ctx)?;

    let mut view: ListingView<EventFilter> = ListingView::new(listings.records);
    for filter in args.filters(session)? {
        view.select(filter, &ctx);
    }
    if let Some(query) = &args.search {
        view.search(query, EventFilter::Search, &ctx);
    }

    if view.displayed().is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let favorites = session.favorites.get()?;
    let ranked = view.filters().search_query().is_some();
    for line in render::event_lines(view.displayed(), &favorites, ranked, &ctx) {
        println!("{}", line);
    }

    render::print_summary(view.displayed().len(), view.all().len(), &view.filters().descriptions());

    Ok(())
}

pub(crate) fn to_set(values: &[String]) -> BTreeSet<String> {
    values.iter().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).collect()
}
