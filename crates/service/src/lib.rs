//! Booking core for the Ceiling Pro site.
//! - Pure domain rules: estimate calculation and booking form validation.
//! - Remote backend client behind the `BackendActor` trait.
//! - Admin session gate owning the local session marker and the query cache.
//! - `SiteClient` tying them together for the public and admin views.

pub mod errors;
pub mod estimate;
pub mod booking;
pub mod remote;
pub mod storage;
pub mod cache;
pub mod session;
pub mod site;
pub mod admin;
pub mod runtime;

pub use session::AdminSessionGate;
pub use site::SiteClient;
