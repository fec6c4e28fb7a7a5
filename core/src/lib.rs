//! Handoff library - navigation state passed between the portal and the dashboard.
//!
//! This crate provides:
//! - Environment-selected integration config (`config`)
//! - The handoff state model and its TTL (`state`)
//! - URL-safe token encoding (`codec`) and query-string helpers (`query`)
//! - Session-store and URL-token channels (`transport`)
//! - Building, sending and reading handoffs (`handoff`)
//! - One-shot resolution for a page (`consume`)
//! - The SSO session probe (`sso`)
//!
//! Feature flags:
//! - `cli`: Command-line interface

pub mod codec;
pub mod config;
pub mod consume;
pub mod error;
pub mod handoff;
pub mod query;
pub mod sso;
pub mod state;
pub mod transport;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{Direction, Environment, PortalIntegrationConfig};
pub use consume::{HandoffConsumer, HandoffView};
pub use error::HandoffError;
pub use handoff::Handoff;
pub use state::{HandoffRequest, HandoffState, HANDOFF_TTL_MS};
