//! # UI Module
//!
//! Screen state and the coordinator that connects it to the domain layer.
//!
//! ```text
//! ┌──────────────────┐    commands    ┌──────────────────────┐
//! │  DashboardState  │ ─────────────► │ DashboardCoordinator │
//! │ (screens, cache) │ ◄───────────── │  (MutationService)   │
//! └──────────────────┘ seed/invalidate└──────────────────────┘
//! ```

pub mod app_coordinator;
pub mod state;

pub use app_coordinator::DashboardCoordinator;
