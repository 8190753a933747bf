//! Storage abstractions for service layer
//!
//! The only state the client persists is a small string key/value map, the
//! analogue of browser local storage.

pub mod local_store;

pub use local_store::LocalStore;
