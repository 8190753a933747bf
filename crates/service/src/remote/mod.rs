//! Remote backend actor: the storage service holding bookings, rates, slots and images.
//!
//! The site only needs the named operations below; `http` binds them to a
//! JSON-over-HTTP transport and `mock` keeps everything in memory for tests.

pub mod errors;
pub mod http;
pub mod mock;
pub mod repository;

pub use errors::RemoteError;
pub use http::HttpBackend;
pub use repository::BackendActor;
