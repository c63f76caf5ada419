//! Reaction to the API rejecting the session token.

use std::sync::Arc;

use tracing::{info, warn};

use super::navigator::{Navigator, Route};
use super::notifications::Notifications;
use crate::api::ClientError;
use crate::session::Session;
use crate::telemetry::{SessionClearReason, TelemetryEvent, TelemetrySink};

/// Ends the session when a call fails with [`ClientError::Unauthorized`].
///
/// The gateway has already removed the persisted token by the time this
/// runs; this drops the cached profile, sends the user to the login screen
/// and records the event.
#[derive(Clone)]
pub struct SessionExpiry {
    session: Arc<Session>,
    navigator: Arc<Navigator>,
    notifications: Arc<Notifications>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl SessionExpiry {
    /// Wires the components a session expiry touches.
    #[must_use]
    pub fn new(
        session: Arc<Session>,
        navigator: Arc<Navigator>,
        notifications: Arc<Notifications>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            session,
            navigator,
            notifications,
            telemetry,
        }
    }

    /// Handles `error` when it is an authorisation failure. Returns true when
    /// the session was ended.
    pub fn observe(&self, error: &ClientError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        if let Err(clear_error) = self.session.clear() {
            warn!(error = %clear_error, "could not clear session after 401");
        }
        self.navigator.navigate(Route::Login, false);
        self.notifications.info("Your session has ended. Please log in again.");
        self.telemetry.record(TelemetryEvent::SessionCleared {
            reason: SessionClearReason::Unauthorized,
        });
        info!("session ended by API");
        true
    }
}

impl std::fmt::Debug for SessionExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionExpiry")
            .field("session", &self.session)
            .field("navigator", &self.navigator)
            .finish_non_exhaustive()
    }
}
