use anyhow::Result;
use listings_core::source::FavoritesStore;
use owo_colors::OwoColorize;

use super::Session;

pub fn add(session: &mut Session, id: &str) -> Result<()> {
    if session.favorites.add(id)? {
        println!("{} {}", "★".yellow(), id);
    } else {
        println!("{}", format!("{} is already a favorite", id).dimmed());
    }
    Ok(())
}

pub fn remove(session: &mut Session, id: &str) -> Result<()> {
    if session.favorites.remove(id)? {
        println!("{} {}", "☆".dimmed(), id);
    } else {
        println!("{}", format!("{} was not a favorite", id).dimmed());
    }
    Ok(())
}

pub fn list(session: &Session) -> Result<()> {
    let ids = session.favorites.get()?;

    if ids.is_empty() {
        println!("{}", "No favorites yet".dimmed());
        return Ok(());
    }

    for id in ids {
        println!("{} {}", "★".yellow(), id);
    }
    Ok(())
}
