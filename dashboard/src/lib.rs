//! Core of the personal productivity and wellness dashboard: records,
//! formatting, list views, forms, caching and the state behind each screen.

pub mod backend;
pub mod ui;
