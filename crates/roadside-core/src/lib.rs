//! # roadside-core - Core Domain Types
//!
//! Foundation crate for the roadside assistance head unit. Provides domain
//! records, navigation types, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, dirs).
//!
//! ## Public API
//!
//! ### Navigation Types (`types`)
//! - [`Tab`] - The three tab bar positions
//! - [`Operation`] - The four data source queries
//! - [`LocationAuthorization`], [`LocationAccuracy`] - Platform location grants
//!
//! ### Assistance Records (`assistance`)
//! - [`Issue`], [`Car`], [`Destination`] - Wizard selections
//! - [`Advisory`] - Service message delivered once per connection
//! - [`PointOfInterest`], [`PostalAddress`], [`Coordinate`] - Map data
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use roadside_core::prelude::*;
//! ```

pub mod assistance;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all roadside crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use assistance::{
    Advisory, Car, Coordinate, Destination, Issue, PointOfInterest, PostalAddress,
};
pub use error::{Error, Result, ResultExt};
pub use types::{LocationAccuracy, LocationAuthorization, Operation, Tab};
