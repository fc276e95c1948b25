use std::fmt;

/// Which remote mutation a toggle issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleDirection {
    Favorite,
    Unfavorite,
}

impl ToggleDirection {
    /// The direction that flips the given membership.
    pub fn from_membership(was_favorite: bool) -> Self {
        if was_favorite {
            ToggleDirection::Unfavorite
        } else {
            ToggleDirection::Favorite
        }
    }

    /// Membership once the mutation is committed.
    pub fn target_membership(self) -> bool {
        matches!(self, ToggleDirection::Favorite)
    }
}

impl fmt::Display for ToggleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleDirection::Favorite => f.write_str("favorite"),
            ToggleDirection::Unfavorite => f.write_str("unfavorite"),
        }
    }
}

/// Favorite state of a single listing.
///
/// ```text
/// Unfavorited --toggle--> TogglingToFavorited --ok--> Favorited
///      ^                         |
///      +--------- failure -------+
/// ```
///
/// and symmetrically from `Favorited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStatus {
    Unfavorited,
    Favorited,
    TogglingToFavorited,
    TogglingToUnfavorited,
}

impl FavoriteStatus {
    pub fn settled(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteStatus::Favorited
        } else {
            FavoriteStatus::Unfavorited
        }
    }

    pub fn toggling(direction: ToggleDirection) -> Self {
        match direction {
            ToggleDirection::Favorite => FavoriteStatus::TogglingToFavorited,
            ToggleDirection::Unfavorite => FavoriteStatus::TogglingToUnfavorited,
        }
    }

    /// Optimistic membership: what the UI should show.
    pub fn is_favorite(self) -> bool {
        matches!(
            self,
            FavoriteStatus::Favorited | FavoriteStatus::TogglingToFavorited
        )
    }

    pub fn is_pending(self) -> bool {
        matches!(
            self,
            FavoriteStatus::TogglingToFavorited | FavoriteStatus::TogglingToUnfavorited
        )
    }
}
