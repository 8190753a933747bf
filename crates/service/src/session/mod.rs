//! Admin session gate: decides whether the caller may reach the admin dashboard.
//!
//! The local marker is only a hint; the backend's `isCallerAdmin` is the
//! authority and any doubt signs the caller out.

pub mod errors;
pub mod gate;

pub use errors::GateError;
pub use gate::{AdminSessionGate, GateSnapshot, GateState, ADMIN_SESSION_KEY};
