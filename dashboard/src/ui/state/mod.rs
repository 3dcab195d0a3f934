//! # UI State Module
//!
//! Framework-agnostic state behind the dashboard screens. A rendering layer
//! reads from these types and forwards user input to them; none of them
//! perform I/O.
//!
//! ## Module Organization
//!
//! - **resource_cache**: Fetched collections with revisions and invalidation
//! - **notifications**: Success and error toasts
//! - **list_view_state**: Browse/create/edit mode, pending flag, view parameters
//! - **expense_state** / **task_state**: List screens with their add/edit dialogs
//! - **goal_state**: Browse-only career goals list
//! - **mood_state**: Mood check-in widget
//! - **assistant_state**: Mini assistant chat bubble
//! - **app_state**: Everything above, owned together

pub mod app_state;
pub mod assistant_state;
pub mod expense_state;
pub mod goal_state;
pub mod list_view_state;
pub mod mood_state;
pub mod notifications;
pub mod resource_cache;
pub mod task_state;

pub use app_state::*;
pub use assistant_state::*;
pub use expense_state::*;
pub use goal_state::*;
pub use list_view_state::*;
pub use mood_state::*;
pub use notifications::*;
pub use resource_cache::*;
pub use task_state::*;
