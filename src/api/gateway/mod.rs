//! Gateway for the marketplace REST API.
//!
//! [`MarketplaceGateway`] is the seam the services talk to; tests mock it and
//! [`HttpGateway`] implements it over reqwest. The HTTP gateway reads the
//! session token from the shared [`TokenStore`] on every request and clears it
//! whenever the API answers 401, so a stale token never outlives the response
//! that rejected it.

mod error_mapping;
mod http_utils;

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use self::error_mapping::{is_auth_failure, map_decode_error, map_http_error, map_transport_error};
use self::http_utils::{
    CARGOS_PATH, LOGIN_PATH, PROFILE_CARGOS_PATH, PROFILE_PATH, PROFILE_UPDATE_PATH,
    REGISTER_PATH, cargo_path, cargo_update_path, extract_api_message,
};
use super::endpoint::{ApiBase, AuthToken, ListingId};
use super::error::ClientError;
use super::models::{
    CargoUpdate, CommentPayload, Credentials, Listing, NewCargo, ProfileUpdate, Registration,
    TokenResponse, UserProfile,
};
use crate::filter::ListingFilter;
use crate::session::TokenStore;

const USER_AGENT: &str = concat!("yukchi/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// Operations offered by the marketplace API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketplaceGateway: Send + Sync {
    /// Lists cargos matching the filter (`GET cargos/`).
    async fn list_cargos(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ClientError>;

    /// Loads one cargo (`GET cargos/{id}`).
    async fn cargo(&self, id: ListingId) -> Result<Listing, ClientError>;

    /// Creates a cargo (`POST cargos/`).
    async fn create_cargo(&self, cargo: &NewCargo) -> Result<Listing, ClientError>;

    /// Partially updates a cargo (`PUT cargos/{id}/`).
    async fn update_cargo(
        &self,
        id: ListingId,
        update: &CargoUpdate,
    ) -> Result<Listing, ClientError>;

    /// Adds a comment to a cargo and returns it with its reviews
    /// (`PUT cargos/{id}`).
    async fn add_comment(
        &self,
        id: ListingId,
        comment: &CommentPayload,
    ) -> Result<Listing, ClientError>;

    /// Loads the signed-in user's profile (`GET profile`).
    async fn profile(&self) -> Result<UserProfile, ClientError>;

    /// Updates the signed-in user's profile (`PUT profile/`).
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError>;

    /// Lists the signed-in user's own cargos (`GET profile/cargos`).
    async fn user_cargos(&self) -> Result<Vec<Listing>, ClientError>;

    /// Exchanges credentials for a session token (`POST login`).
    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ClientError>;

    /// Creates an account and returns its session token (`POST register/`).
    async fn register(&self, registration: &Registration) -> Result<AuthToken, ClientError>;
}

/// Marketplace gateway backed by reqwest.
pub struct HttpGateway {
    client: Client,
    base: ApiBase,
    tokens: Arc<dyn TokenStore>,
}

impl HttpGateway {
    /// Creates a gateway for `base` that authenticates with the token held in
    /// `tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(base: ApiBase, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| ClientError::Configuration {
                message: format!("build HTTP client failed: {error}"),
            })?;
        Ok(Self {
            client,
            base,
            tokens,
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub const fn base(&self) -> &ApiBase {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base.join(path)?;
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);
        // A token store failure degrades to an anonymous request; the API
        // answers 401 for anything that needed the token.
        let token = self.tokens.load().unwrap_or_else(|error| {
            warn!(%error, "could not read session token");
            None
        });
        Ok(match token {
            Some(value) => builder.header(AUTHORIZATION, value.authorization_header()),
            None => builder,
        })
    }

    async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<String, ClientError> {
        debug!(operation, "sending marketplace request");
        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        if status.is_success() {
            debug!(operation, %status, "marketplace request succeeded");
            return Ok(body);
        }

        if is_auth_failure(status) {
            self.clear_token(operation);
        }
        warn!(operation, %status, "marketplace request failed");
        Err(map_http_error(operation, status, extract_api_message(&body)))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.execute(operation, request).await?;
        serde_json::from_str(&body).map_err(|error| map_decode_error(operation, &error))
    }

    async fn fetch_token(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<AuthToken, ClientError> {
        let response: TokenResponse = self.fetch(operation, request).await?;
        AuthToken::new(response.token).map_err(|_| ClientError::Decode {
            message: format!("{operation} returned an empty token"),
        })
    }

    fn clear_token(&self, operation: &str) {
        match self.tokens.clear() {
            Ok(()) => info!(operation, "cleared session token after 401"),
            Err(error) => warn!(operation, %error, "could not clear session token after 401"),
        }
    }
}

#[async_trait]
impl MarketplaceGateway for HttpGateway {
    async fn list_cargos(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ClientError> {
        let request = self
            .request(Method::GET, CARGOS_PATH)?
            .query(&filter.to_query_pairs());
        self.fetch("list cargos", request).await
    }

    async fn cargo(&self, id: ListingId) -> Result<Listing, ClientError> {
        let request = self.request(Method::GET, &cargo_path(id))?;
        self.fetch("load cargo", request).await
    }

    async fn create_cargo(&self, cargo: &NewCargo) -> Result<Listing, ClientError> {
        let request = self.request(Method::POST, CARGOS_PATH)?.json(cargo);
        self.fetch("create cargo", request).await
    }

    async fn update_cargo(
        &self,
        id: ListingId,
        update: &CargoUpdate,
    ) -> Result<Listing, ClientError> {
        let request = self
            .request(Method::PUT, &cargo_update_path(id))?
            .json(update);
        self.fetch("update cargo", request).await
    }

    async fn add_comment(
        &self,
        id: ListingId,
        comment: &CommentPayload,
    ) -> Result<Listing, ClientError> {
        let request = self.request(Method::PUT, &cargo_path(id))?.json(comment);
        self.fetch("add comment", request).await
    }

    async fn profile(&self) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::GET, PROFILE_PATH)?;
        self.fetch("load profile", request).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        let request = self
            .request(Method::PUT, PROFILE_UPDATE_PATH)?
            .json(update);
        self.fetch("update profile", request).await
    }

    async fn user_cargos(&self) -> Result<Vec<Listing>, ClientError> {
        let request = self.request(Method::GET, PROFILE_CARGOS_PATH)?;
        self.fetch("load user cargos", request).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ClientError> {
        let request = self.request(Method::POST, LOGIN_PATH)?.json(credentials);
        self.fetch_token("login", request).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthToken, ClientError> {
        let request = self.request(Method::POST, REGISTER_PATH)?.json(registration);
        self.fetch_token("register", request).await
    }
}
