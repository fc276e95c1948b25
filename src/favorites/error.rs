use thiserror::Error;

use crate::app::ApiError;
use crate::domain::{ListingId, ToggleDirection};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// Another toggle for this listing has not resolved yet.
    #[error("A favorite change for listing {listing_id} is already pending")]
    Pending { listing_id: ListingId },

    /// The remote mutation failed and the local flip was rolled back.
    #[error("Could not {direction} listing {listing_id}: {source}")]
    Remote {
        listing_id: ListingId,
        direction: ToggleDirection,
        #[source]
        source: ApiError,
    },
}
