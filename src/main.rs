mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::Session;

#[derive(Parser)]
#[command(name = "listings")]
#[command(about = "Browse, search and filter event and burger listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered
    Events(commands::events::EventArgs),

    /// List burgers, optionally filtered
    Burgers(commands::burgers::BurgerArgs),

    /// Manage favorited listings
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Show the values each filter can take
    Options {
        #[arg(value_enum)]
        feed: commands::options::FeedChoice,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Favorite a listing by id
    Add { id: String },

    /// Unfavorite a listing by id
    Remove { id: String },

    /// Print favorited ids
    List,
}

fn main() -> Result<()> {
    // Logs go to stderr so listing output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut session = Session::load()?;

    match cli.command {
        Commands::Events(args) => commands::events::run(&session, args),
        Commands::Burgers(args) => commands::burgers::run(&session, args),
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { id } => commands::favorite::add(&mut session, &id),
            FavoriteAction::Remove { id } => commands::favorite::remove(&mut session, &id),
            FavoriteAction::List => commands::favorite::list(&session),
        },
        Commands::Options { feed } => commands::options::run(&session, feed),
    }
}
