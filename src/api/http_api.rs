use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{ApiResult, MarketplaceApi};
use crate::app::{ApiError, Result};
use crate::config::ApiConfig;
use crate::domain::{Listing, ListingId};

/// reqwest-backed [`MarketplaceApi`].
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.parsed_base_url()?,
        })
    }

    /// Resolve `segments` below the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        endpoint(&self.base_url, segments)
    }

    async fn send(&self, request: RequestBuilder, subject: &str) -> ApiResult<Response> {
        let response = request.send().await?;
        check_status(response.status(), subject)?;
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        subject: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, subject).await?;
        let body = response.bytes().await?;
        decode_body(&body)
    }
}

#[async_trait]
impl MarketplaceApi for HttpApi {
    async fn fetch_favorites(&self, token: &str) -> ApiResult<Vec<Listing>> {
        let url = self.endpoint(&["users", "favorites"]);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url).bearer_auth(token), "favorites")
            .await
    }

    async fn add_favorite(&self, token: &str, id: &ListingId) -> ApiResult<()> {
        let url = self.endpoint(&["users", "favorites", id.as_str()]);
        tracing::debug!("POST {}", url);
        self.send(self.client.post(url).bearer_auth(token), id.as_str())
            .await?;
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, id: &ListingId) -> ApiResult<()> {
        let url = self.endpoint(&["users", "favorites", id.as_str()]);
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url).bearer_auth(token), id.as_str())
            .await?;
        Ok(())
    }

    async fn fetch_listings(&self) -> ApiResult<Vec<Listing>> {
        let url = self.endpoint(&["listings"]);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url), "listings").await
    }

    async fn search_listings(&self, query: &str) -> ApiResult<Vec<Listing>> {
        let mut url = self.endpoint(&["listings", "search"]);
        url.query_pairs_mut().append_pair("q", query);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url), "listings").await
    }

    async fn fetch_listing(&self, id: &ListingId) -> ApiResult<Listing> {
        let url = self.endpoint(&["listings", id.as_str()]);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url), id.as_str()).await
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments);
    }
    url
}

/// A 2xx body the client cannot parse is reported like a transport failure.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Network(format!("invalid response body: {}", e)))
}

/// Map a response status onto the error taxonomy.
fn check_status(status: StatusCode, subject: &str) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Auth),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(subject.to_string())),
        other => Err(ApiError::Network(format!("unexpected status {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:5000/api").unwrap()
    }

    #[test]
    fn test_favorite_endpoint_is_canonical() {
        let url = endpoint(&base(), &["users", "favorites", "64f1c2"]);
        assert_eq!(url.as_str(), "http://localhost:5000/api/users/favorites/64f1c2");
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let base = Url::parse("http://localhost:5000/api/").unwrap();
        let url = endpoint(&base, &["listings"]);
        assert_eq!(url.as_str(), "http://localhost:5000/api/listings");
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let url = endpoint(&base(), &["listings", "a/b c"]);
        assert_eq!(url.as_str(), "http://localhost:5000/api/listings/a%2Fb%20c");
    }

    #[test]
    fn test_search_query_is_encoded() {
        let mut url = endpoint(&base(), &["listings", "search"]);
        url.query_pairs_mut().append_pair("q", "HSR layout");
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/listings/search?q=HSR+layout"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(check_status(StatusCode::OK, "L1").is_ok());
        assert!(check_status(StatusCode::CREATED, "L1").is_ok());
        assert!(check_status(StatusCode::NO_CONTENT, "L1").is_ok());
        assert_eq!(
            check_status(StatusCode::UNAUTHORIZED, "L1"),
            Err(ApiError::Auth)
        );
        assert_eq!(
            check_status(StatusCode::FORBIDDEN, "L1"),
            Err(ApiError::Auth)
        );
        assert_eq!(
            check_status(StatusCode::NOT_FOUND, "L1"),
            Err(ApiError::NotFound("L1".into()))
        );
        match check_status(StatusCode::INTERNAL_SERVER_ERROR, "L1") {
            Err(ApiError::Network(message)) => assert!(message.contains("500")),
            other => panic!("expected a network error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_body() {
        let listings: Vec<Listing> =
            decode_body(br#"[{"_id": "L1", "location": "Koramangala"}]"#).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, ListingId::new("L1"));

        let empty: Vec<Listing> = decode_body(b"[]").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_malformed_body_is_network_error() {
        let result: ApiResult<Vec<Listing>> = decode_body(b"<html>Bad Gateway</html>");
        match result {
            Err(ApiError::Network(message)) => {
                assert!(message.starts_with("invalid response body"))
            }
            other => panic!("expected a network error, got {:?}", other),
        }

        // An object where a list is expected
        let result: ApiResult<Vec<Listing>> = decode_body(br#"{"message": "ok"}"#);
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[test]
    fn test_new_uses_configured_base() {
        let config = ApiConfig::default();
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(
            api.endpoint(&["listings", "search"]).as_str(),
            "http://localhost:5000/api/listings/search"
        );
    }
}
