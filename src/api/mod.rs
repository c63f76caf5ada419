//! Typed access to the freight marketplace REST API.
//!
//! This module owns the wire models, the endpoint wrappers (base URL,
//! listing ids, session tokens) and the [`MarketplaceGateway`] seam with its
//! reqwest implementation. Failures are mapped into [`ClientError`] so callers
//! never see transport types.

pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod models;

pub use endpoint::{ApiBase, AuthToken, DEFAULT_API_URL, ListingId};
pub use error::ClientError;
pub use gateway::{HttpGateway, MarketplaceGateway};
pub use models::{
    CargoUpdate, CommentPayload, Credentials, Listing, ListingStatus, NewCargo, Party,
    ProfileUpdate, Registration, Review, UserProfile, VehicleType,
};

#[cfg(test)]
pub use gateway::MockMarketplaceGateway;
