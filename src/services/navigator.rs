//! Screen routes and the session guards in front of them.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::api::ListingId;

/// A screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing screen with recent cargos and statistics.
    Home,
    /// Filterable cargo list.
    Cargos,
    /// One cargo with its reviews.
    CargoDetail(ListingId),
    /// Add-cargo form.
    AddCargo,
    /// Signed-in user's profile and cargos.
    Profile,
    /// Login form.
    Login,
    /// Registration form.
    Register,
}

impl Route {
    /// Routes that need a session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Profile | Self::AddCargo)
    }

    /// Routes only offered to signed-out users.
    #[must_use]
    pub const fn is_auth_only(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Applies the session guards: protected routes send signed-out users to
    /// [`Route::Login`]; login and registration send signed-in users to
    /// [`Route::Profile`].
    #[must_use]
    pub const fn guarded(self, authenticated: bool) -> Self {
        if !authenticated && self.is_protected() {
            Self::Login
        } else if authenticated && self.is_auth_only() {
            Self::Profile
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Cargos => f.write_str("/cargos"),
            Self::CargoDetail(id) => write!(f, "/cargos/{id}"),
            Self::AddCargo => f.write_str("/add-cargo"),
            Self::Profile => f.write_str("/profile"),
            Self::Login => f.write_str("/login"),
            Self::Register => f.write_str("/register"),
        }
    }
}

/// Tracks the current route.
#[derive(Debug)]
pub struct Navigator {
    current: Mutex<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts at [`Route::Home`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Mutex::new(Route::Home),
        }
    }

    /// Route on display.
    #[must_use]
    pub fn current(&self) -> Route {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigates to `requested` after applying the session guards and
    /// returns the route actually shown.
    pub fn navigate(&self, requested: Route, authenticated: bool) -> Route {
        let resolved = requested.guarded(authenticated);
        if resolved != requested {
            debug!(%requested, %resolved, "route redirected by session guard");
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = resolved;
        resolved
    }

    /// Re-applies the guards to the current route after the session changed.
    pub fn revalidate(&self, authenticated: bool) -> Route {
        self.navigate(self.current(), authenticated)
    }
}
