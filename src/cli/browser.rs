//! Interactive terminal browser for the marketplace.
//!
//! This module provides the entry point for the terminal user interface that
//! shows featured cargos and lets users browse and filter the cargo list.

use std::io::{self, Write};

use bubbletea_rs::Program;
use crossterm::terminal;
use yukchi::tui::{MarketApp, TuiBootstrap, set_bootstrap, set_initial_terminal_size};
use yukchi::{AppServices, ClientError, ListingFilter, YukchiConfig};

/// Runs the terminal browser.
///
/// The full cargo list is loaded up front; the filter options narrow it
/// locally.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for invalid filter options, or
/// [`ClientError::Io`] if the terminal program fails.
pub async fn run(config: &YukchiConfig, services: &AppServices) -> Result<(), ClientError> {
    let filter = config.filter_form().validate()?;
    let listings = services.cargo().list(&ListingFilter::default()).await;

    // Storage is set once per process; a second run keeps the first data.
    let _ = set_bootstrap(TuiBootstrap {
        services: services.clone(),
        listings,
        filter,
    });
    if let Ok((width, height)) = terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }

    run_tui().await.map_err(|error| ClientError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `MarketApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // MarketApp::init() will retrieve data from module-level storage.
    let program = Program::<MarketApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
