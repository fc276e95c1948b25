use futures::future::join_all;

use crate::app::{ApiError, AppContext, Result, RoostError};
use crate::domain::{FavoriteSet, FavoriteStatus, Listing, ListingId, ToggleDirection};
use crate::favorites::ToggleError;

const SIGNED_OUT_NOTICE: &str = "Not signed in: favorites are not shown";

/// Load favorites for a view that still works signed out.
///
/// Returns false when there is no usable session.
async fn sync_favorites(ctx: &AppContext) -> Result<bool> {
    match ctx.favorites.load().await {
        Ok(_) => Ok(true),
        Err(ApiError::Auth) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_listings(ctx: &AppContext) -> Result<()> {
    let (listings, signed_in) = tokio::try_join!(
        async { ctx.api.fetch_listings().await.map_err(RoostError::from) },
        sync_favorites(ctx)
    )?;

    if !signed_in {
        println!("{}", SIGNED_OUT_NOTICE);
    }

    if listings.is_empty() {
        println!("No listings yet");
        return Ok(());
    }

    for line in listing_lines(&listings, |id| ctx.favorites.status(id)) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(RoostError::Other("Search query is empty".into()));
    }

    let (listings, signed_in) = tokio::try_join!(
        async { ctx.api.search_listings(query).await.map_err(RoostError::from) },
        sync_favorites(ctx)
    )?;

    if !signed_in {
        println!("{}", SIGNED_OUT_NOTICE);
    }

    if listings.is_empty() {
        println!("No properties match \"{}\"", query);
        return Ok(());
    }

    println!("{} found for \"{}\"", pluralize(listings.len()), query);
    for line in listing_lines(&listings, |id| ctx.favorites.status(id)) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn show_listing(ctx: &AppContext, id: &str) -> Result<()> {
    let id = ListingId::new(id);
    let (listing, signed_in) = tokio::try_join!(
        async { ctx.api.fetch_listing(&id).await.map_err(RoostError::from) },
        sync_favorites(ctx)
    )?;

    let status = signed_in.then(|| ctx.favorites.status(&listing.id));
    for line in detail_lines(&listing, status, &ctx.config.api.files_url) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn list_favorites(ctx: &AppContext) -> Result<()> {
    let listings = ctx.favorites.load_listings().await?;

    if listings.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }

    println!("{} saved", pluralize(listings.len()));
    for line in listing_lines(&listings, |id| ctx.favorites.status(id)) {
        println!("{}", line);
    }
    Ok(())
}

/// Flip each id concurrently. Repeating an id in one call exercises the
/// pending guard: only the first occurrence reaches the backend.
pub async fn toggle_favorites(ctx: &AppContext, ids: &[String]) -> Result<()> {
    // Toggling needs the current membership
    ctx.favorites.load().await?;

    let ids: Vec<ListingId> = ids.iter().map(|id| ListingId::new(id.as_str())).collect();
    let results = join_all(ids.iter().map(|id| ctx.favorites.toggle(id))).await;

    let mut changed = 0;
    let mut errors = 0;
    for (id, result) in ids.iter().zip(&results) {
        match result {
            Ok(set) => {
                changed += 1;
                println!("{}", toggle_success_line(id, set));
            }
            Err(e) => {
                errors += 1;
                eprintln!("{}", toggle_error_line(e));
            }
        }
    }

    println!("Done: {} changed, {} failed", changed, errors);
    Ok(())
}

fn pluralize(count: usize) -> String {
    if count == 1 {
        "1 property".to_string()
    } else {
        format!("{} properties", count)
    }
}

pub fn favorite_marker(status: FavoriteStatus) -> &'static str {
    if status.is_pending() {
        "…"
    } else if status.is_favorite() {
        "♥"
    } else {
        "♡"
    }
}

pub fn listing_lines<F>(listings: &[Listing], status: F) -> Vec<String>
where
    F: Fn(&ListingId) -> FavoriteStatus,
{
    listings
        .iter()
        .map(|listing| {
            format!(
                "{} {}  {}  [{}]",
                favorite_marker(status(&listing.id)),
                listing.display_title(),
                listing.display_rent(),
                listing.id
            )
        })
        .collect()
}

pub fn detail_lines(
    listing: &Listing,
    status: Option<FavoriteStatus>,
    files_url: &str,
) -> Vec<String> {
    let mut lines = vec![
        listing.display_title().to_string(),
        format!("  Rent:     {}", listing.display_rent()),
    ];

    let optional = [
        ("Address", listing.address.as_deref()),
        ("Pin code", listing.pin_code.as_deref()),
        ("Nearby", listing.nearby_institutions.as_deref()),
        ("Contact", listing.contact_details.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("  {:<9} {}", format!("{}:", label), value));
        }
    }

    let mut features = Vec::new();
    if let Some(bedrooms) = listing.bedrooms {
        features.push(format!("{} bed", bedrooms));
    }
    if let Some(bathrooms) = listing.bathrooms {
        features.push(format!("{} bath", bathrooms));
    }
    if let Some(area) = listing.area {
        features.push(format!("{} sq ft", area));
    }
    if !features.is_empty() {
        lines.push(format!("  {}", features.join(" · ")));
    }

    if let Some(image) = listing.cover_image_url(files_url) {
        lines.push(format!("  Image:    {}", image));
    }
    match listing.videos.len() {
        0 => {}
        1 => lines.push("  Videos:   1 video".to_string()),
        n => lines.push(format!("  Videos:   {} videos", n)),
    }
    if let Some(description) = listing.description.as_deref() {
        lines.push(String::new());
        lines.push(description.to_string());
    }

    lines.push(String::new());
    lines.push(match status {
        Some(status) if status.is_favorite() => {
            format!("{} In your favorites", favorite_marker(status))
        }
        Some(status) => {
            format!("{} Not in your favorites", favorite_marker(status))
        }
        None => SIGNED_OUT_NOTICE.to_string(),
    });
    lines
}

pub fn toggle_success_line(id: &ListingId, set: &FavoriteSet) -> String {
    if set.contains(id) {
        format!("♥ Added {} to favorites", id)
    } else {
        format!("♡ Removed {} from favorites", id)
    }
}

pub fn toggle_error_line(error: &ToggleError) -> String {
    match error {
        ToggleError::Pending { listing_id } => {
            format!("! Skipped {}: a change is already in progress", listing_id)
        }
        ToggleError::Remote {
            listing_id,
            direction,
            source,
        } => {
            let action = match direction {
                ToggleDirection::Favorite => "add",
                ToggleDirection::Unfavorite => "remove",
            };
            let hint = if source.requires_login() {
                " (sign in again)"
            } else {
                ""
            };
            format!("! Could not {} {}: {}{}", action, listing_id, source, hint)
        }
    }
}
