//! Mock marketplace API driven from synchronous BDD steps.

use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};
use yukchi::YukchiConfig;

/// A wiremock server standing in for the marketplace, together with the
/// runtime its futures are driven on.
#[derive(Clone)]
pub struct MockMarketplace {
    server: Rc<MockServer>,
    runtime: Rc<Runtime>,
}

impl MockMarketplace {
    /// Starts a runtime and a mock server on it.
    ///
    /// # Errors
    ///
    /// Returns an error when the Tokio runtime cannot be created.
    pub fn start() -> io::Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self {
            server: Rc::new(server),
            runtime: Rc::new(runtime),
        })
    }

    /// Drives `future` to completion on the marketplace runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Mounts `mocks` on the server.
    pub fn mount(&self, mocks: impl IntoIterator<Item = Mock>) {
        for mock in mocks {
            self.block_on(mock.mount(&self.server));
        }
    }

    /// Configuration pointing the client at this marketplace.
    pub fn config(&self) -> YukchiConfig {
        YukchiConfig {
            api_url: Some(self.server.uri()),
            ..Default::default()
        }
    }

    /// Requests received so far, oldest first.
    pub fn received_requests(&self) -> Vec<Request> {
        self.block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

/// Returns the scenario's marketplace, starting one on first use.
///
/// # Panics
///
/// Panics when the runtime cannot be created.
pub fn ensure_marketplace(slot: &Slot<MockMarketplace>) -> MockMarketplace {
    if let Some(marketplace) = slot.get() {
        return marketplace;
    }
    let marketplace = MockMarketplace::start()
        .unwrap_or_else(|error| panic!("failed to start mock marketplace: {error}"));
    slot.set(marketplace.clone());
    marketplace
}
