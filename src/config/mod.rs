//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.yukchi.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `YUKCHI_API_URL`, `YUKCHI_DATABASE_URL`,
//!    `YUKCHI_PHONE_NUMBER`, `YUKCHI_PASSWORD`, ...
//! 4. **Command-line arguments** – `--api-url`, `--database-url`, ...
//!
//! # Configuration File
//!
//! Place `.yukchi.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! api_url = "https://yukchi.example/api/v1"
//! database_url = "yukchi.sqlite"
//! phone_number = "+998901234567"
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{ApiBase, ClientError, DEFAULT_API_URL, ListingId};
use crate::forms::{
    CargoForm, CargoUpdateForm, CommentForm, FilterForm, LoginForm, ProfileForm, RegisterForm,
};

/// Operation selected by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Create or upgrade the local database and exit.
    MigrateDatabase,
    /// Interactive terminal browser.
    Tui,
    /// Log in and store the session token.
    Login,
    /// Create an account and store the session token.
    Register,
    /// Remove the stored session token.
    Logout,
    /// Post a new cargo.
    AddCargo,
    /// Partially update one cargo.
    UpdateCargo,
    /// Comment on one cargo.
    Comment,
    /// Show one cargo with its reviews.
    ShowCargo,
    /// Show the signed-in user's profile and cargos.
    Profile,
    /// Update the signed-in user's profile.
    UpdateProfile,
    /// List cargos matching the filter options.
    ListCargos,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// Boolean switches are only read from the CLI and configuration files;
/// `ortho_config` does not load boolean values from the environment.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use yukchi::YukchiConfig;
///
/// let config = YukchiConfig::load().expect("failed to load configuration");
/// let base = config.api_base().expect("API URL should be valid");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "YUKCHI",
    discovery(
        dotfile_name = ".yukchi.toml",
        config_file_name = "yukchi.toml",
        app_name = "yukchi"
    )
)]
pub struct YukchiConfig {
    /// Base URL of the marketplace API. Defaults to the local development
    /// server.
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Local `SQLite` database URL/path holding the session token. Without
    /// it the session only lasts for the current process.
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    #[ortho_config()]
    pub migrate_db: bool,

    /// Launches the interactive terminal browser.
    #[ortho_config(cli_short = 'T')]
    pub tui: bool,

    /// Writes telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,

    /// Logs in with `phone_number` and `password`.
    #[ortho_config()]
    pub login: bool,

    /// Registers with `name`, `phone_number`, `email` and `password`.
    #[ortho_config()]
    pub register: bool,

    /// Removes the stored session token.
    #[ortho_config()]
    pub logout: bool,

    /// Posts a new cargo from the cargo options.
    #[ortho_config()]
    pub add_cargo: bool,

    /// Shows the signed-in user's profile and cargos.
    #[ortho_config()]
    pub profile: bool,

    /// With `cargo_id`, updates that cargo; with `profile`, updates the
    /// profile.
    #[ortho_config()]
    pub update: bool,

    /// Cargo to show, update or comment on.
    #[ortho_config(cli_short = 'i')]
    pub cargo_id: Option<u64>,

    /// Comment text to add to `cargo_id`.
    #[ortho_config()]
    pub comment: Option<String>,

    /// Display name (registration) or cargo name.
    #[ortho_config()]
    pub name: Option<String>,

    /// Phone number for login and registration.
    #[ortho_config()]
    pub phone_number: Option<String>,

    /// Password for login and registration.
    #[ortho_config()]
    pub password: Option<String>,

    /// Email for registration.
    #[ortho_config()]
    pub email: Option<String>,

    /// Cargo weight in tonnes.
    #[ortho_config()]
    pub weight: Option<String>,

    /// Cargo origin, or the origin filter when listing.
    #[ortho_config()]
    pub origin: Option<String>,

    /// Cargo destination, or the destination filter when listing.
    #[ortho_config()]
    pub destination: Option<String>,

    /// Vehicle type of a cargo or profile, or the vehicle filter when
    /// listing (`all` for any).
    #[ortho_config()]
    pub vehicle_type: Option<String>,

    /// Cargo price.
    #[ortho_config()]
    pub price: Option<String>,

    /// Cargo description.
    #[ortho_config()]
    pub description: Option<String>,

    /// Driving licence category for profile updates.
    #[ortho_config()]
    pub license_type: Option<String>,

    /// Truck capacity in tonnes for profile updates.
    #[ortho_config()]
    pub vehicle_capacity: Option<String>,

    /// Years of experience for profile updates.
    #[ortho_config()]
    pub experience: Option<String>,

    /// Minimum weight filter.
    #[ortho_config()]
    pub min_weight: Option<String>,

    /// Maximum weight filter.
    #[ortho_config()]
    pub max_weight: Option<String>,

    /// Minimum price filter.
    #[ortho_config()]
    pub min_price: Option<String>,

    /// Maximum price filter.
    #[ortho_config()]
    pub max_price: Option<String>,
}

impl YukchiConfig {
    /// Determines the operation from the configured switches.
    ///
    /// Database migration wins over everything, then the terminal browser,
    /// then the account switches, then cargo and profile operations. Without
    /// any switch the cargo list is shown.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.tui {
            OperationMode::Tui
        } else if self.login {
            OperationMode::Login
        } else if self.register {
            OperationMode::Register
        } else if self.logout {
            OperationMode::Logout
        } else if self.add_cargo {
            OperationMode::AddCargo
        } else if self.cargo_id.is_some() {
            if self.update {
                OperationMode::UpdateCargo
            } else if self.comment.is_some() {
                OperationMode::Comment
            } else {
                OperationMode::ShowCargo
            }
        } else if self.profile {
            if self.update {
                OperationMode::UpdateProfile
            } else {
                OperationMode::Profile
            }
        } else {
            OperationMode::ListCargos
        }
    }

    /// Parses the API base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the configured URL is not an
    /// absolute `http` or `https` URL.
    pub fn api_base(&self) -> Result<ApiBase, ClientError> {
        ApiBase::parse(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))
    }

    /// Returns the configured database URL, treating blank values as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Returns the cargo identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when no identifier is
    /// configured or it is zero.
    pub fn require_cargo_id(&self) -> Result<ListingId, ClientError> {
        let raw = self.cargo_id.ok_or_else(|| ClientError::Configuration {
            message: "cargo id is required (use --cargo-id or -i)".to_owned(),
        })?;
        ListingId::new(raw)
    }

    /// Raw add-cargo form built from the cargo options.
    #[must_use]
    pub fn cargo_form(&self) -> CargoForm {
        CargoForm {
            name: owned(self.name.as_ref()),
            weight: owned(self.weight.as_ref()),
            origin: owned(self.origin.as_ref()),
            destination: owned(self.destination.as_ref()),
            vehicle_type: owned(self.vehicle_type.as_ref()),
            price: self.price.clone(),
            description: self.description.clone(),
        }
    }

    /// Raw cargo update form built from the cargo options.
    #[must_use]
    pub fn cargo_update_form(&self) -> CargoUpdateForm {
        CargoUpdateForm {
            name: self.name.clone(),
            weight: self.weight.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            vehicle_type: self.vehicle_type.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
        }
    }

    /// Raw comment form.
    #[must_use]
    pub fn comment_form(&self) -> CommentForm {
        CommentForm {
            comment: owned(self.comment.as_ref()),
        }
    }

    /// Raw login form.
    #[must_use]
    pub fn login_form(&self) -> LoginForm {
        LoginForm {
            phone_number: owned(self.phone_number.as_ref()),
            password: owned(self.password.as_ref()),
        }
    }

    /// Raw registration form.
    #[must_use]
    pub fn register_form(&self) -> RegisterForm {
        RegisterForm {
            name: owned(self.name.as_ref()),
            phone_number: owned(self.phone_number.as_ref()),
            email: owned(self.email.as_ref()),
            password: owned(self.password.as_ref()),
        }
    }

    /// Raw profile update form.
    #[must_use]
    pub fn profile_form(&self) -> ProfileForm {
        ProfileForm {
            vehicle_type: self.vehicle_type.clone(),
            license_type: self.license_type.clone(),
            vehicle_capacity: self.vehicle_capacity.clone(),
            experience: self.experience.clone(),
        }
    }

    /// Raw filter form built from the listing options.
    #[must_use]
    pub fn filter_form(&self) -> FilterForm {
        FilterForm {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            vehicle_type: self.vehicle_type.clone(),
            min_weight: self.min_weight.clone(),
            max_weight: self.max_weight.clone(),
            min_price: self.min_price.clone(),
            max_price: self.max_price.clone(),
        }
    }
}

fn owned(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}
