//! Terminal browser for the freight marketplace.
//!
//! The browser follows the Model-View-Update (MVU) pattern on bubbletea-rs:
//!
//! - **Model**: Application state in [`app::MarketApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Filter draft and cursor state
//! - [`components`]: Reusable UI components
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Initial Data Loading
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, startup data is handed over through [`set_bootstrap`]. Call it
//! before starting the program and `MarketApp::init()` will retrieve it.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;
mod storage;

pub use app::MarketApp;
pub use storage::{TuiBootstrap, set_bootstrap, set_initial_terminal_size};
