//! # Roost
//!
//! A terminal client for a flat-rental marketplace: browse and search
//! listings, and keep a list of favorites in sync with the backend.
//!
//! ## Architecture
//!
//! ```text
//! CLI views → FavoritesManager → MarketplaceApi → REST backend
//!                    ↑
//!              TokenProvider
//! ```
//!
//! - [`favorites`]: optimistic favorites state with rollback
//! - [`api`]: HTTP contract of the marketplace backend
//! - [`auth`]: session token sources
//! - [`cli`]: subcommands acting as views
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse everything, favorites marked with ♥
//! roost listings
//!
//! # Search by location
//! roost search koramangala
//!
//! # Flip favorites
//! roost toggle 64f1c2 64f1c3
//!
//! # Show saved listings
//! roost favorites
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together
/// configuration, the API client and the favorites manager.
pub mod app;

/// HTTP access to the marketplace backend.
///
/// - [`MarketplaceApi`](api::MarketplaceApi): Async trait for backend calls
/// - [`HttpApi`](api::HttpApi): reqwest-based implementation
pub mod api;

/// Bearer token providers.
pub mod auth;

/// Command-line interface using clap.
///
/// - `listings` - All listings
/// - `search <query>` - Matching listings
/// - `show <id>` - One listing in detail
/// - `favorites` - Saved listings
/// - `toggle <id>...` - Add/remove favorites
pub mod cli;

/// Configuration loaded from `~/.config/roost/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Listing`](domain::Listing): A rental listing as served by the backend
/// - [`FavoriteSet`](domain::FavoriteSet): Favorited listing ids
/// - [`FavoriteStatus`](domain::FavoriteStatus): Per-listing toggle state
pub mod domain;

/// Favorites synchronization.
///
/// [`FavoritesManager`](favorites::FavoritesManager) applies toggles
/// optimistically, rejects a second toggle of the same listing while one
/// is in flight, and rolls back on failure.
pub mod favorites;
