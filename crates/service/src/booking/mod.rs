//! Booking form rules and the conversion to a backend submission.

pub mod validation;

pub use validation::{prepare_submission, validate_booking_form, validate_booking_form_on, BookingField, ValidationResult};
