//! # deskbridge
//!
//! TOPdesk (knowledge base, incidents) and Zenya (documents, search) REST
//! backends exposed as a set of agent-callable tools.
//!
//! ## Features
//!
//! - **Complete result sets**: one aggregation loop walks both pagination
//!   styles, status-driven offsets and continuation tokens
//! - **Token lifecycle**: TOPdesk logs in once, Zenya tokens refresh lazily
//!   after their lifetime
//! - **Normalized records**: nested search results mapped onto flat fields
//!   through configurable paths
//! - **Query builders**: FIQL filters from email, status and identifier
//! - **Uniform tool results**: failures come back as `{"error": ...}` data
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deskbridge::{config::Settings, tools::Toolbox, Result};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::from_env()?;
//!     let toolbox = Toolbox::from_settings(&settings).await?;
//!
//!     let incidents = toolbox
//!         .dispatch("list_incidents_by_caller", json!({"email": "a@b.com"}))
//!         .await;
//!     println!("{incidents}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Tool Surface                          │
//! │   13 tools  ·  catalog  ·  dispatch  ·  error sentinels      │
//! └──────────────────────────────────────────────────────────────┘
//!                │                                │
//!       ┌────────┴────────┐              ┌────────┴────────┐
//!       │     TOPdesk     │              │      Zenya      │
//!       │ query builders  │              │   normalizer    │
//!       └────────┬────────┘              └────────┬────────┘
//! ┌──────────────┴────────────────────────────────┴──────────────┐
//! │   Pagination: status offset · empty-page offset · token      │
//! ├──────────────────────────────┬───────────────────────────────┤
//! │        HTTP (reqwest)        │   Auth: operator / API token  │
//! └──────────────────────────────┴───────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Backend settings
pub mod config;

/// Token acquisition and auth headers
pub mod auth;

/// HTTP client wrapper
pub mod http;

/// Pagination strategies and the aggregation loop
pub mod pagination;

/// Field-path record normalization
pub mod normalize;

/// FIQL query builders
pub mod query;

/// TOPdesk client
pub mod topdesk;

/// Zenya client
pub mod zenya;

/// Agent-callable tools
pub mod tools;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::Settings;
pub use tools::Toolbox;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
