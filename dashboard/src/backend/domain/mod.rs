//! # Domain Module
//!
//! Contains the business logic of the wellness dashboard.
//!
//! Nothing in here knows about widgets, screens or the network. The domain
//! turns raw API records into display-ready values and decides what a valid
//! payload looks like before it is handed to the storage layer.
//!
//! ## Module Organization
//!
//! - **formatting**: Currency, date, relative time, size, duration and name formatting
//! - **list_view**: Filter-sort-aggregate engine shared by every list screen
//! - **records**: List bindings for expenses, tasks, goals and mood entries
//! - **status_styles**: Badge styles for task status, goal status and priority
//! - **mood_service**: Mood categories, check-in validation and weekly summary
//! - **budget_service**: Budget progress and per-category spending
//! - **quick_expense**: Recognizes "I spent ₹120 on food" chat messages
//! - **expense_form** / **task_form**: Draft validation for the add/edit dialogs
//! - **export_service**: CSV export of the visible expense list
//! - **mutation_service**: Validated create, update and delete calls against the API
//!
//! ## Business Rules
//!
//! - Formatting never fails; bad input renders as a placeholder
//! - Category filters compare exactly, searches are case-insensitive
//! - Records with an unusable sort key always sort after the valid ones
//! - Malformed amounts are shown as missing and contribute 0 to totals
//! - Mood, energy and stress use a 1-10 scale

pub mod budget_service;
pub mod expense_form;
pub mod export_service;
pub mod formatting;
pub mod list_view;
pub mod mood_service;
pub mod mutation_service;
pub mod quick_expense;
pub mod records;
pub mod status_styles;
pub mod task_form;

pub use budget_service::*;
pub use expense_form::*;
pub use export_service::*;
pub use formatting::*;
pub use list_view::*;
pub use mood_service::*;
pub use mutation_service::*;
pub use quick_expense::*;
pub use status_styles::*;
pub use task_form::*;
