use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ListingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A rental listing as served by the backend. Read-only, possibly stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: ListingId,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
    #[serde(default)]
    pub nearby_institutions: Option<String>,
    #[serde(default)]
    pub rent_money: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_details: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

impl Listing {
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            location: None,
            address: None,
            pin_code: None,
            nearby_institutions: None,
            rent_money: None,
            description: None,
            contact_details: None,
            bedrooms: None,
            bathrooms: None,
            area: None,
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    pub fn display_title(&self) -> &str {
        self.location
            .as_deref()
            .or(self.address.as_deref())
            .unwrap_or("(Untitled listing)")
    }

    pub fn display_rent(&self) -> String {
        match self.rent_money {
            Some(rent) => format!("${}/month", rent),
            None => "Rent on request".to_string(),
        }
    }

    /// URL of the first image, resolved against the files server.
    pub fn cover_image_url(&self, files_url: &str) -> Option<String> {
        let image = self.images.first()?;
        Some(format!(
            "{}/{}",
            files_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        ))
    }
}
