//! Favorites state shared by every view.
//!
//! [`FavoritesManager`] keeps the local [`FavoriteSet`](crate::domain::FavoriteSet)
//! in step with the backend:
//!
//! ```text
//! load()   → GET  /users/favorites   → full replace (pending flips kept)
//! toggle() → optimistic flip → POST/DELETE /users/favorites/{id} → commit | rollback
//! ```
//!
//! Views read with [`FavoritesManager::is_favorite`] and re-render when the
//! [`subscribe`](FavoritesManager::subscribe) channel reports a change.

mod error;
mod manager;

pub use error::ToggleError;
pub use manager::FavoritesManager;
