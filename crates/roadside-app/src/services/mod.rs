//! Service layer consumed by the assistance flow
//!
//! The flow and tab container never reach for ambient globals: everything
//! they read is injected through these services.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  ┌─────────────────┐  ┌────────────┐
//! │ SessionState │  │ PermissionState │  │ DataSource │
//! └──────┬───────┘  └────────┬────────┘  └─────┬──────┘
//!        │ subscribe()       │ subscribe()     │ async query
//!        └─────────┬─────────┘                 │
//!           ┌──────▼──────┐             ┌──────▼──────┐
//!           │   Engine    │◄────────────│   actions   │
//!           │ (msg queue) │   Message   └─────────────┘
//!           └─────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`SessionState`]: Login flag, optionally persisted
//! - [`PermissionState`]: Location grant folded into "precise location enabled"
//! - [`DataSource`]: Advisory, issue, car and tow destination queries
//!
//! Login and permission changes are published on `tokio::sync::watch`
//! channels; the engine forwards them into its message queue.

pub mod canned;
mod data_source;
mod permission;
mod session;

pub use data_source::{DataSource, FakeDataSource, LocalDataSource};
pub use permission::{LocationGrant, PermissionState};
pub use session::SessionState;
