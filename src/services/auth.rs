//! Session lifecycle: restore, login, registration, logout and profile
//! updates.

use std::sync::Arc;

use tracing::{info, warn};

use super::cargo::toast_message;
use super::expiry::SessionExpiry;
use super::loading::LoadingState;
use super::navigator::{Navigator, Route};
use super::notifications::Notifications;
use crate::api::{AuthToken, ClientError, MarketplaceGateway, UserProfile};
use crate::forms::{LoginForm, ProfileForm, RegisterForm};
use crate::session::Session;
use crate::telemetry::{SessionClearReason, TelemetryEvent, TelemetrySink};

/// Authentication operations.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn MarketplaceGateway>,
    session: Arc<Session>,
    loading: LoadingState,
    notifications: Arc<Notifications>,
    navigator: Arc<Navigator>,
    telemetry: Arc<dyn TelemetrySink>,
    expiry: SessionExpiry,
}

/// Components the auth service coordinates.
pub struct AuthDependencies {
    /// API gateway.
    pub gateway: Arc<dyn MarketplaceGateway>,
    /// Session to populate and clear.
    pub session: Arc<Session>,
    /// Loading indicator.
    pub loading: LoadingState,
    /// Toast queue.
    pub notifications: Arc<Notifications>,
    /// Route tracker.
    pub navigator: Arc<Navigator>,
    /// Telemetry sink.
    pub telemetry: Arc<dyn TelemetrySink>,
    /// Reaction to 401 responses.
    pub expiry: SessionExpiry,
}

impl AuthService {
    /// Wires the service.
    #[must_use]
    pub fn new(dependencies: AuthDependencies) -> Self {
        let AuthDependencies {
            gateway,
            session,
            loading,
            notifications,
            navigator,
            telemetry,
            expiry,
        } = dependencies;
        Self {
            gateway,
            session,
            loading,
            notifications,
            navigator,
            telemetry,
            expiry,
        }
    }

    /// Re-fetches the profile for a stored token. Any failure clears the
    /// token and leaves the user signed out.
    pub async fn restore(&self) -> Option<UserProfile> {
        match self.session.token() {
            Ok(Some(_)) => {}
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "could not read stored session token");
                return None;
            }
        }

        let _guard = self.loading.begin();
        match self.gateway.profile().await {
            Ok(profile) => {
                self.session.set_profile(profile.clone());
                info!(user = profile.id, "session restored");
                Some(profile)
            }
            Err(error) => {
                warn!(%error, "stored session token was rejected");
                if let Err(clear_error) = self.session.clear() {
                    warn!(error = %clear_error, "could not clear stored session token");
                }
                self.telemetry.record(TelemetryEvent::SessionCleared {
                    reason: SessionClearReason::RestoreFailed,
                });
                None
            }
        }
    }

    /// Validates the form, logs in and loads the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without calling the API when the
    /// form is invalid, or the API failure otherwise.
    pub async fn login(&self, form: &LoginForm) -> Result<Option<UserProfile>, ClientError> {
        let credentials = form.validate()?;
        let _guard = self.loading.begin();
        let issued = self.gateway.login(&credentials).await;
        self.finish_sign_in(issued, "Logged in", "Wrong phone number or password")
            .await
    }

    /// Validates the form, registers and loads the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without calling the API when the
    /// form is invalid, or the API failure otherwise.
    pub async fn register(
        &self,
        form: &RegisterForm,
    ) -> Result<Option<UserProfile>, ClientError> {
        let registration = form.validate()?;
        let _guard = self.loading.begin();
        let issued = self.gateway.register(&registration).await;
        self.finish_sign_in(issued, "Registered", "Registration failed")
            .await
    }

    /// Ends the session and returns to the home screen.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the stored token cannot be
    /// removed.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session.clear()?;
        self.navigator.navigate(Route::Home, false);
        self.telemetry.record(TelemetryEvent::SessionCleared {
            reason: SessionClearReason::Logout,
        });
        self.notifications.success("Logged out");
        Ok(())
    }

    /// Validates the form and updates the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session,
    /// [`ClientError::Validation`] for invalid input, or the API failure.
    pub async fn update_profile(&self, form: &ProfileForm) -> Result<UserProfile, ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let update = form.validate()?;
        let _guard = self.loading.begin();
        match self.gateway.update_profile(&update).await {
            Ok(profile) => {
                self.session.merge_profile(profile);
                self.notifications.success("Profile updated");
                self.session.profile().ok_or(ClientError::NotAuthenticated)
            }
            Err(error) => {
                self.report("update profile", "Could not update the profile", &error);
                Err(error)
            }
        }
    }

    /// Loads the profile for the current session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session, or the
    /// API failure.
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let _guard = self.loading.begin();
        match self.gateway.profile().await {
            Ok(profile) => {
                self.session.set_profile(profile.clone());
                Ok(profile)
            }
            Err(error) => {
                self.report("load profile", "Could not load the profile", &error);
                Err(error)
            }
        }
    }

    async fn finish_sign_in(
        &self,
        issued: Result<AuthToken, ClientError>,
        success: &str,
        fallback: &str,
    ) -> Result<Option<UserProfile>, ClientError> {
        let token = match issued {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "sign-in failed");
                self.notifications.error(toast_message(fallback, &error));
                return Err(error);
            }
        };
        self.session.establish(&token, None)?;

        // A profile failure after a successful sign-in keeps the session; the
        // profile screen retries the fetch.
        let profile = match self.gateway.profile().await {
            Ok(profile) => {
                self.session.set_profile(profile.clone());
                Some(profile)
            }
            Err(error) if error.is_unauthorized() => {
                self.expiry.observe(&error);
                return Err(error);
            }
            Err(error) => {
                warn!(%error, "could not load profile after sign-in");
                None
            }
        };
        self.notifications.success(success);
        self.navigator.navigate(Route::Profile, true);
        Ok(profile)
    }

    fn report(&self, operation: &str, fallback: &str, error: &ClientError) {
        warn!(operation, %error, "marketplace call failed");
        if self.expiry.observe(error) {
            return;
        }
        self.notifications.error(toast_message(fallback, error));
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
