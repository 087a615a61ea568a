//! Collaborators the filter core relies on but does not own:
//! where listings come from, where the device is, and what the user favorited.

mod favorites;
mod listing;
mod location;

pub use favorites::{FavoritesStore, FileFavorites, MemoryFavorites};
pub use listing::{CachedListingSource, FileListingSource, ListingSource};
pub use location::{FixedLocation, LocationProvider};
