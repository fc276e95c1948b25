use std::sync::Arc;

use crate::api::{HttpApi, MarketplaceApi};
use crate::app::error::Result;
use crate::auth::{SessionFile, StaticToken, TokenProvider};
use crate::config::Config;
use crate::favorites::FavoritesManager;

pub struct AppContext {
    pub config: Config,
    pub api: Arc<dyn MarketplaceApi + Send + Sync>,
    pub favorites: Arc<FavoritesManager>,
}

impl AppContext {
    /// Build the context from configuration.
    ///
    /// An explicit `token` wins over the session file.
    pub fn new(config: Config, token: Option<String>) -> Result<Self> {
        let api: Arc<dyn MarketplaceApi + Send + Sync> = Arc::new(HttpApi::new(&config.api)?);
        let tokens: Arc<dyn TokenProvider + Send + Sync> = match token {
            Some(token) => Arc::new(StaticToken::new(token)),
            None => Arc::new(SessionFile::new(config.session.token_file()?)),
        };

        Ok(Self::with_api(config, api, tokens))
    }

    pub fn with_api(
        config: Config,
        api: Arc<dyn MarketplaceApi + Send + Sync>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        let favorites = Arc::new(FavoritesManager::new(api.clone(), tokens));
        Self {
            config,
            api,
            favorites,
        }
    }
}
