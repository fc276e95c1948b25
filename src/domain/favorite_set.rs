use std::collections::HashSet;

use super::ListingId;

/// Listing ids the current user has marked favorite.
///
/// Backed by a `HashSet` so membership checks stay O(1); every rendered
/// listing asks once per render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    member_ids: HashSet<ListingId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ListingId>,
    {
        Self {
            member_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &ListingId) -> bool {
        self.member_ids.contains(id)
    }

    /// Assign membership of `id`. Returns true if anything changed.
    pub fn set(&mut self, id: &ListingId, member: bool) -> bool {
        if member {
            if self.member_ids.contains(id) {
                false
            } else {
                self.member_ids.insert(id.clone())
            }
        } else {
            self.member_ids.remove(id)
        }
    }

    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }
}

impl FromIterator<ListingId> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = ListingId>>(iter: T) -> Self {
        Self {
            member_ids: iter.into_iter().collect(),
        }
    }
}
