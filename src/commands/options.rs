use anyhow::Result;
use clap::ValueEnum;
use listings_core::date_range::QuickDate;
use listings_core::{Events, Products};
use owo_colors::OwoColorize;

use super::Session;

#[derive(Clone, Copy, ValueEnum)]
pub enum FeedChoice {
    Events,
    Burgers,
}

pub fn run(session: &Session, feed: FeedChoice) -> Result<()> {
    let ctx = session.context();

    match feed {
        FeedChoice::Events => {
            let metadata = session
                .load_feed::<Events>(&session.config.events_feed_path(), &ctx)?
                .metadata;
            let buckets: Vec<String> = QuickDate::ALL.iter().map(|q| q.to_string()).collect();

            print_values("--when", &buckets);
            print_values("--source", &metadata.sources);
            print_values("--type", &metadata.event_types);
        }
        FeedChoice::Burgers => {
            let metadata = session
                .load_feed::<Products>(&session.config.burgers_feed_path(), &ctx)?
                .metadata;

            print_values("--diet", &metadata.dietary_restrictions);
            print_values("--protein", &metadata.proteins);
            print_values("--beer", &metadata.beer_matches);
            if let (Some(min), Some(max)) = (metadata.min_price, metadata.max_price) {
                println!("{}", "--max-price".bold());
                println!("  {:.2} to {:.2}", min, max);
            }
        }
    }

    Ok(())
}

fn print_values(flag: &str, values: &[String]) {
    println!("{}", flag.bold());
    if values.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for value in values {
        println!("  {}", value);
    }
}
