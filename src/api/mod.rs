pub mod http_api;

use async_trait::async_trait;

use crate::app::ApiError;
use crate::domain::{Listing, ListingId};

pub use http_api::HttpApi;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Remote marketplace backend.
///
/// Favorites calls carry the caller's bearer token; listing reads are
/// public.
#[async_trait]
pub trait MarketplaceApi {
    /// `GET /users/favorites`
    async fn fetch_favorites(&self, token: &str) -> ApiResult<Vec<Listing>>;

    /// `POST /users/favorites/{id}`
    async fn add_favorite(&self, token: &str, id: &ListingId) -> ApiResult<()>;

    /// `DELETE /users/favorites/{id}`
    async fn remove_favorite(&self, token: &str, id: &ListingId) -> ApiResult<()>;

    /// `GET /listings`
    async fn fetch_listings(&self) -> ApiResult<Vec<Listing>>;

    /// `GET /listings/search?q={query}`
    async fn search_listings(&self, query: &str) -> ApiResult<Vec<Listing>>;

    /// `GET /listings/{id}`
    async fn fetch_listing(&self, id: &ListingId) -> ApiResult<Listing>;
}
