use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::MarketplaceApi;
use crate::app::ApiError;
use crate::auth::TokenProvider;
use crate::domain::{FavoriteSet, FavoriteStatus, Listing, ListingId, ToggleDirection};
use crate::favorites::ToggleError;

#[derive(Debug, Default)]
struct State {
    favorites: FavoriteSet,
    /// At most one in-flight toggle per listing.
    pending: HashMap<ListingId, ToggleDirection>,
    /// Listings whose toggle settled while a load was in flight, keyed to
    /// the settle sequence number.
    settled: HashMap<ListingId, u64>,
    settle_seq: u64,
    next_ticket: u64,
    applied_ticket: u64,
    loads_in_flight: usize,
}

impl State {
    /// Replace the set with a fetched one.
    ///
    /// Listings with a pending toggle, or whose toggle settled after the
    /// load was issued at `issued_at`, keep their local membership: the
    /// response cannot be trusted to include those mutations.
    fn apply_load(&mut self, ticket: u64, issued_at: u64, fetched: FavoriteSet) -> bool {
        self.applied_ticket = ticket;

        let mut next = fetched;
        for id in self.pending.keys() {
            next.set(id, self.favorites.contains(id));
        }
        for (id, settled_at) in &self.settled {
            if *settled_at > issued_at {
                next.set(id, self.favorites.contains(id));
            }
        }

        let changed = next != self.favorites;
        self.favorites = next;
        changed
    }

    fn status(&self, id: &ListingId) -> FavoriteStatus {
        match self.pending.get(id) {
            Some(direction) => FavoriteStatus::toggling(*direction),
            None => FavoriteStatus::settled(self.favorites.contains(id)),
        }
    }
}

/// Owner of the current user's [`FavoriteSet`].
///
/// Toggles are applied optimistically and rolled back when the backend
/// rejects them. Toggles on the same listing are serialized by rejection;
/// toggles on different listings run independently. The state lock is
/// never held across a network call.
pub struct FavoritesManager {
    api: Arc<dyn MarketplaceApi + Send + Sync>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
    state: Mutex<State>,
    notify: watch::Sender<FavoriteSet>,
}

impl FavoritesManager {
    pub fn new(
        api: Arc<dyn MarketplaceApi + Send + Sync>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        let (notify, _) = watch::channel(FavoriteSet::new());
        Self {
            api,
            tokens,
            state: Mutex::new(State::default()),
            notify,
        }
    }

    /// Fetch the user's favorites and replace the local set.
    ///
    /// On failure the previous set is left untouched.
    pub async fn load(&self) -> Result<FavoriteSet, ApiError> {
        self.load_listings().await?;
        Ok(self.snapshot())
    }

    /// Like [`load`](Self::load), also returning the favorite listings.
    pub async fn load_listings(&self) -> Result<Vec<Listing>, ApiError> {
        let token = self.tokens.token().ok_or(ApiError::Auth)?;

        let (ticket, issued_at) = {
            let mut state = self.lock();
            state.next_ticket += 1;
            state.loads_in_flight += 1;
            (state.next_ticket, state.settle_seq)
        };
        let _in_flight = LoadGuard { manager: self };

        let listings = match self.api.fetch_favorites(&token).await {
            Ok(listings) => listings,
            Err(e) => {
                warn!(retryable = e.is_retryable(), "Failed to load favorites: {}", e);
                return Err(e);
            }
        };

        let fetched: FavoriteSet = listings.iter().map(|l| l.id.clone()).collect();
        let mut state = self.lock();
        if ticket <= state.applied_ticket {
            debug!(
                "Discarding favorites load #{} superseded by #{}",
                ticket, state.applied_ticket
            );
        } else {
            if state.apply_load(ticket, issued_at, fetched) {
                self.publish(&state);
            }
            info!("Loaded {} favorites", state.favorites.len());
        }

        // Only the records the local set agrees with
        Ok(listings
            .into_iter()
            .filter(|l| state.favorites.contains(&l.id))
            .collect())
    }

    /// Whether `id` is shown as favorite, including optimistic flips.
    pub fn is_favorite(&self, id: &ListingId) -> bool {
        self.lock().favorites.contains(id)
    }

    pub fn status(&self, id: &ListingId) -> FavoriteStatus {
        self.lock().status(id)
    }

    pub fn snapshot(&self) -> FavoriteSet {
        self.lock().favorites.clone()
    }

    /// Receive a fresh snapshot whenever the set changes.
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.notify.subscribe()
    }

    /// Flip the favorite state of `id`.
    ///
    /// The local set changes immediately; the backend call follows. A
    /// second toggle of the same listing while the first is in flight is
    /// rejected with [`ToggleError::Pending`] and sends nothing.
    pub async fn toggle(&self, id: &ListingId) -> Result<FavoriteSet, ToggleError> {
        let token = self.tokens.token();

        let (token, direction, was_favorite) = {
            let mut state = self.lock();
            if state.pending.contains_key(id) {
                warn!("Rejecting toggle of {}: already pending", id);
                return Err(ToggleError::Pending {
                    listing_id: id.clone(),
                });
            }

            let was_favorite = state.favorites.contains(id);
            let direction = ToggleDirection::from_membership(was_favorite);
            let Some(token) = token else {
                return Err(ToggleError::Remote {
                    listing_id: id.clone(),
                    direction,
                    source: ApiError::Auth,
                });
            };

            state.pending.insert(id.clone(), direction);
            state.favorites.set(id, direction.target_membership());
            self.publish(&state);
            (token, direction, was_favorite)
        };
        debug!("Optimistic {} of {}", direction, id);

        let guard = ToggleGuard {
            manager: self,
            id,
            was_favorite,
            settled: false,
        };

        let result = match direction {
            ToggleDirection::Favorite => self.api.add_favorite(&token, id).await,
            ToggleDirection::Unfavorite => self.api.remove_favorite(&token, id).await,
        };

        match result {
            Ok(()) => {
                debug!("Committed {} of {}", direction, id);
                Ok(guard.settle(true))
            }
            Err(source) => {
                warn!("Rolling back {} of {}: {}", direction, id, source);
                guard.settle(false);
                Err(ToggleError::Remote {
                    listing_id: id.clone(),
                    direction,
                    source,
                })
            }
        }
    }

    fn settle(&self, id: &ListingId, was_favorite: bool, committed: bool) -> FavoriteSet {
        let mut state = self.lock();
        state.pending.remove(id);

        // Assignment, not a flip: safe to apply when nothing changed.
        if !committed && state.favorites.set(id, was_favorite) {
            self.publish(&state);
        }

        state.settle_seq += 1;
        if state.loads_in_flight > 0 {
            let seq = state.settle_seq;
            state.settled.insert(id.clone(), seq);
        }
        state.favorites.clone()
    }

    fn publish(&self, state: &State) {
        self.notify.send_replace(state.favorites.clone());
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles a toggle exactly once. Dropping an unsettled guard (the
/// toggle future was abandoned mid-request) rolls the flip back.
struct ToggleGuard<'a> {
    manager: &'a FavoritesManager,
    id: &'a ListingId,
    was_favorite: bool,
    settled: bool,
}

impl ToggleGuard<'_> {
    fn settle(mut self, committed: bool) -> FavoriteSet {
        self.settled = true;
        self.manager.settle(self.id, self.was_favorite, committed)
    }
}

impl Drop for ToggleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Toggle of {} abandoned before the backend answered", self.id);
            self.manager.settle(self.id, self.was_favorite, false);
        }
    }
}

struct LoadGuard<'a> {
    manager: &'a FavoritesManager,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.manager.lock();
        state.loads_in_flight -= 1;
        if state.loads_in_flight == 0 {
            state.settled.clear();
        }
    }
}
