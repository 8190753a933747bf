//! Domain types shared by the booking core.
//! - Static service catalog and the rate table it prices against.
//! - Shapes exchanged with the remote backend (bookings, slots, images).
//! - Small display helpers that do not depend on any I/O.

pub mod errors;
pub mod catalog;
pub mod rates;
pub mod property;
pub mod booking;
pub mod slots;
pub mod images;
pub mod contact;
