//! # NeoQuest - Neo N3 prediction markets in the terminal
//!
//! A terminal user interface for Yes/No prediction markets deployed on
//! the Neo N3 blockchain.
//!
//! ## Architecture
//!
//! - **App**: Core application state and lifecycle management
//! - **UI**: Layout and rendering logic
//! - **Wallet**: Provider abstraction and Neo JSON-RPC integration
//! - **Market**: Typed contract operations
//! - **State**: Centralized state management
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod market;
pub mod state;
pub mod ui;
pub mod wallet;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
