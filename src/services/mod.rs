//! Application services shared by the command-line operations and the
//! terminal browser.
//!
//! [`AppServices`] is the composition root: it owns the one [`Session`], the
//! loading counter, the toast queue, the route tracker and the query cache,
//! and wires them into the cargo and auth services. Nothing here is global;
//! every consumer receives the pieces it needs from this struct.

mod auth;
mod cargo;
mod expiry;
mod loading;
mod navigator;
mod notifications;
mod query_cache;

use std::sync::Arc;

use tracing::{debug, info};

pub use auth::{AuthDependencies, AuthService};
pub use cargo::CargoService;
pub use expiry::SessionExpiry;
pub use loading::{LoadingGuard, LoadingState};
pub use navigator::{Navigator, Route};
pub use notifications::{MAX_TOASTS, Notifications, Toast, ToastKind};
pub use query_cache::{Invalidation, QueryCache, QueryKey};

use crate::api::{ClientError, HttpGateway, MarketplaceGateway, UserProfile};
use crate::config::YukchiConfig;
use crate::persistence::{LocalStorage, SqliteTokenStore, map_persistence_error, migrate_database};
use crate::session::{MemoryTokenStore, Session, TokenStore};
use crate::telemetry::TelemetrySink;

/// Every long-lived component of a running client.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<Session>,
    loading: LoadingState,
    notifications: Arc<Notifications>,
    navigator: Arc<Navigator>,
    cache: Arc<QueryCache>,
    cargo: CargoService,
    auth: AuthService,
}

impl AppServices {
    /// Wires the services around an existing gateway and token store.
    ///
    /// The gateway must share `tokens` with the session so a token saved at
    /// login is sent on the next request.
    #[must_use]
    pub fn compose(
        gateway: Arc<dyn MarketplaceGateway>,
        tokens: Arc<dyn TokenStore>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let loading = LoadingState::new();
        let notifications = Arc::new(Notifications::new());
        let navigator = Arc::new(Navigator::new());
        let session = Arc::new(Session::new(tokens));
        let cache = Arc::new(QueryCache::new());
        let expiry = SessionExpiry::new(
            Arc::clone(&session),
            Arc::clone(&navigator),
            Arc::clone(&notifications),
            Arc::clone(&telemetry),
        );
        let cargo = CargoService::new(
            Arc::clone(&gateway),
            loading.clone(),
            Arc::clone(&notifications),
            Arc::clone(&cache),
            expiry.clone(),
        );
        let auth = AuthService::new(AuthDependencies {
            gateway,
            session: Arc::clone(&session),
            loading: loading.clone(),
            notifications: Arc::clone(&notifications),
            navigator: Arc::clone(&navigator),
            telemetry,
            expiry,
        });
        Self {
            session,
            loading,
            notifications,
            navigator,
            cache,
            cargo,
            auth,
        }
    }

    /// Builds the services described by `config` and restores any stored
    /// session.
    ///
    /// With a database URL the token is persisted in local storage (migrating
    /// the database first); without one it lasts for this process only.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for a bad API URL, or a
    /// configuration or storage error when local storage cannot be prepared.
    pub async fn start(
        config: &YukchiConfig,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Result<(Self, Option<UserProfile>), ClientError> {
        let base = config.api_base()?;
        let tokens = token_store(config, telemetry.as_ref())?;
        let gateway = HttpGateway::new(base, Arc::clone(&tokens))?;
        debug!(api = %gateway.base().as_url(), "marketplace gateway ready");

        let services = Self::compose(Arc::new(gateway), tokens, telemetry);
        let profile = services.auth.restore().await;
        services
            .navigator
            .revalidate(services.session.is_authenticated());
        Ok((services, profile))
    }

    /// Drops in-memory state when the client shuts down. The persisted
    /// token is kept.
    pub fn shutdown(&self) {
        self.session.teardown();
        self.notifications.clear();
        self.cache.clear();
        info!("services shut down");
    }

    /// The session shared by every service.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The loading indicator.
    #[must_use]
    pub const fn loading(&self) -> &LoadingState {
        &self.loading
    }

    /// The toast queue.
    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// The route tracker.
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The query cache.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Cargo operations.
    #[must_use]
    pub const fn cargo(&self) -> &CargoService {
        &self.cargo
    }

    /// Authentication operations.
    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("session", &self.session)
            .field("navigator", &self.navigator)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

fn token_store(
    config: &YukchiConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<Arc<dyn TokenStore>, ClientError> {
    let Some(database_url) = config.database_url() else {
        debug!("no database configured; session token kept in memory");
        return Ok(Arc::new(MemoryTokenStore::default()));
    };
    migrate_database(database_url, telemetry)
        .map_err(|error| map_persistence_error("prepare local storage", &error))?;
    let storage = LocalStorage::new(database_url)
        .map_err(|error| map_persistence_error("open local storage", &error))?;
    Ok(Arc::new(SqliteTokenStore::new(storage)))
}
