//! Yukchi library crate: a client for a freight marketplace.
//!
//! The library talks to the marketplace REST API, keeps the session token in
//! local storage, validates forms before anything is sent, and provides the
//! pieces of the terminal browser: a listing filter, an auto-advancing
//! carousel and count-up statistics.
//!
//! # Examples
//!
//! ```
//! use yukchi::YukchiConfig;
//!
//! let config = YukchiConfig::default();
//! let base = config.api_base().expect("default API URL is valid");
//! assert_eq!(base.as_url().as_str(), "http://127.0.0.1:8000/api/v1/");
//! ```

pub mod api;
pub mod config;
pub mod filter;
pub mod forms;
pub mod persistence;
pub mod presentation;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod tui;

pub use api::{
    ApiBase, AuthToken, ClientError, HttpGateway, Listing, ListingId, MarketplaceGateway,
    UserProfile, VehicleType,
};
pub use config::{OperationMode, YukchiConfig};
pub use filter::{ListingFilter, VehicleTypeFilter};
pub use forms::FormErrors;
pub use services::AppServices;
pub use session::{MemoryTokenStore, Session, TokenStore};
