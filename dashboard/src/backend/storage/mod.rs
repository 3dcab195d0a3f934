//! # Storage Module
//!
//! Everything that reads or writes dashboard data sits behind the
//! [`DashboardApi`] trait. The domain and presentation layers only ever see
//! the trait, so a remote REST client, the local JSON data directory and the
//! in-memory doubles used in tests are interchangeable.
//!
//! ## Current Implementation
//!
//! - **json**: one JSON array per collection inside a data directory, written
//!   atomically with a temp file and rename

pub mod json;
pub mod traits;

pub use json::JsonFileApi;
pub use traits::*;
