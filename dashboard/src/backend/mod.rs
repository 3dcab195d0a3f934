//! # Backend Module
//!
//! Contains all non-UI logic of the wellness dashboard.
//!
//! ## Architecture
//!
//! ```text
//! UI state (list views, widgets, resource cache)
//!     ↓
//! Domain (formatting, list engine, validation, mutations)
//!     ↓
//! Storage (DashboardApi: JSON data directory or remote API)
//! ```
//!
//! Configuration is loaded once at startup and handed down to the layers
//! that need it.

pub mod config;
pub mod domain;
pub mod storage;

pub use config::*;
pub use domain::*;
pub use storage::*;
