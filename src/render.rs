//! Terminal rendering for listings.
//!
//! Extension trait plus a few line builders that add owo_colors styling to
//! listings-core records.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use listings_core::{EvaluationContext, Event, Product};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, favorite: bool, tz: &Tz) -> String;
}

fn star(favorite: bool) -> String {
    if favorite {
        "★".yellow().to_string()
    } else {
        " ".to_string()
    }
}

impl Render for Event {
    fn render(&self, favorite: bool, tz: &Tz) -> String {
        let time = match self.first_date() {
            Some(first) => format_time(first, tz),
            None => format!("{:>7}", ""),
        };
        let mut line = format!("{} {} {} {}", star(favorite), time, self.name, format!("@ {}", self.venue).dimmed());

        if self.has_multiple_dates() {
            let more = format!("+{} more dates", self.dates.len() - 1);
            line.push_str(&format!(" {}", more.cyan()));
        }
        line.push_str(&format!(" {}", format!("[{}]", self.id).dimmed()));
        line
    }
}

impl Render for Product {
    fn render(&self, favorite: bool, _tz: &Tz) -> String {
        let price = match self.price {
            Some(price) => format!("{:>7}", format!("${:.2}", price)),
            None => format!("{:>7}", "?"),
        };
        let mut line = format!("{} {} {} {}", star(favorite), price.green(), self.name, format!("@ {}", self.restaurant).dimmed());

        let mut details: Vec<String> = Vec::new();
        if let Some(protein) = &self.protein {
            details.push(protein.clone());
        }
        details.extend(self.dietary_tags.iter().cloned());
        if self.sides_included {
            details.push("sides".to_string());
        }
        if let Some(beer) = &self.beer_match {
            details.push(format!("beer: {}", beer));
        }
        if !details.is_empty() {
            line.push_str(&format!(" {}", details.join(", ").cyan()));
        }
        line.push_str(&format!(" {}", format!("[{}]", self.id).dimmed()));
        line
    }
}

/// Lines for a list of events.
///
/// In base order, consecutive events are grouped under a day heading. Ranked
/// search results are printed flat so the ranking stays visible.
pub fn event_lines(events: &[Event], favorites: &BTreeSet<String>, ranked: bool, ctx: &EvaluationContext) -> Vec<String> {
    let tz = ctx.timezone();
    let mut lines = Vec::new();

    if ranked {
        for event in events {
            lines.push(event.render(favorites.contains(&event.id), &tz));
        }
        return lines;
    }

    let mut current: Option<String> = None;
    for event in events {
        let heading = heading_for(event, ctx.today(), &tz);

        if current.as_ref() != Some(&heading) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(heading.bold().to_string());
            current = Some(heading);
        }

        lines.push(format!(" {}", event.render(favorites.contains(&event.id), &tz)));
    }

    lines
}

pub fn product_lines(products: &[Product], favorites: &BTreeSet<String>, ctx: &EvaluationContext) -> Vec<String> {
    let tz = ctx.timezone();
    products
        .iter()
        .map(|p| p.render(favorites.contains(&p.id), &tz))
        .collect()
}

/// Footer with the match count and the active filters.
pub fn print_summary(shown: usize, total: usize, descriptions: &[String]) {
    println!();
    let count = format!("{} of {} listings", shown, total);
    if descriptions.is_empty() {
        println!("{}", count.dimmed());
    } else {
        println!("{} {}", count.dimmed(), format!("({})", descriptions.join("; ")).dimmed());
    }
}

fn heading_for(event: &Event, today: NaiveDate, tz: &Tz) -> String {
    match event.first_date() {
        Some(first) => format_date_label(first.with_timezone(tz).date_naive(), today),
        None if event.date_label.is_empty() => "Undated".to_string(),
        None => event.date_label.clone(),
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Format the local time of an occurrence (e.g. "  15:00" or "all-day")
fn format_time(instant: &DateTime<Utc>, tz: &Tz) -> String {
    let local = instant.with_timezone(tz);
    if local.time() == chrono::NaiveTime::MIN {
        "all-day".to_string()
    } else {
        format!("{:>7}", local.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_labels_relative_to_today() {
        let today = date(2025, 3, 12);
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(date(2025, 3, 13), today), "Tomorrow");
        assert_eq!(format_date_label(date(2025, 3, 15), today), "Sat Mar 15");
    }

    #[test]
    fn midnight_is_all_day() {
        let tz: Tz = "America/Boise".parse().unwrap();
        let midnight = tz.with_ymd_and_hms(2025, 3, 12, 0, 0, 0).unwrap().with_timezone(&Utc);
        let evening = tz.with_ymd_and_hms(2025, 3, 12, 19, 30, 0).unwrap().with_timezone(&Utc);

        assert_eq!(format_time(&midnight, &tz), "all-day");
        assert_eq!(format_time(&evening, &tz), "  19:30");
    }

    #[test]
    fn undated_events_use_feed_label() {
        let today = date(2025, 3, 12);
        let event = Event {
            id: "e1".into(),
            name: "Open Studio".into(),
            venue: "JUMP".into(),
            source: "Treefort".into(),
            event_type: None,
            dates: Vec::new(),
            date_label: "Ongoing".into(),
            coordinate: None,
            url: None,
        };
        assert_eq!(heading_for(&event, today, &Tz::UTC), "Ongoing");
    }
}
