pub mod favorite_set;
pub mod listing;
pub mod status;

pub use favorite_set::FavoriteSet;
pub use listing::{Listing, ListingId};
pub use status::{FavoriteStatus, ToggleDirection};
