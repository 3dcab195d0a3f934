//! JSON data directory storage.

pub mod api;
pub mod connection;
#[cfg(test)]
pub mod test_utils;

pub use api::JsonFileApi;
pub use connection::JsonConnection;
