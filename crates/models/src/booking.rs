use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw booking form fields, exactly as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingFormInput {
    pub full_name: String,
    pub mobile_number: String,
    pub location: String,
    pub property_type: String,
    pub service: String,
    pub date: String,
    pub time_slot: String,
    pub area: String,
}

/// Validated submission sent to `createBooking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub full_name: String,
    pub mobile_number: String,
    pub location: String,
    pub property_type: String,
    pub service: String,
    pub date: String,
    pub time_slot: String,
    /// Whole square feet; the fractional part of the form value is dropped.
    pub area: u64,
}

/// Booking as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub full_name: String,
    pub mobile_number: String,
    pub location: String,
    pub property_type: String,
    pub service: String,
    pub date: String,
    pub time_slot: String,
    pub area: u64,
    /// Nanoseconds since the Unix epoch.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Booking {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let secs = self.created_at.div_euclid(1_000_000_000);
        let nanos = self.created_at.rem_euclid(1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nanos)
    }

    /// Text shown to the visitor once the backend accepted the booking.
    pub fn confirmation_message(&self) -> String {
        format!("We will contact you shortly at {}.", self.mobile_number)
    }
}

/// Newest bookings first, as the admin table lists them.
pub fn sort_newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: &str, created_at: i64) -> Booking {
        Booking {
            id: id.into(),
            full_name: "Asha Rao".into(),
            mobile_number: "9876543210".into(),
            location: "Pune".into(),
            property_type: "Flat".into(),
            service: "PVC".into(),
            date: "2026-10-20".into(),
            time_slot: "10:00 AM".into(),
            area: 120,
            created_at,
            owner: None,
        }
    }

    #[test]
    fn form_input_accepts_partial_json() {
        let input: BookingFormInput = serde_json::from_str(r#"{"fullName":"Asha","area":"120"}"#).unwrap();
        assert_eq!(input.full_name, "Asha");
        assert_eq!(input.area, "120");
        assert!(input.mobile_number.is_empty());
    }

    #[test]
    fn created_at_is_nanoseconds() {
        let b = booking("b1", 1_700_000_000_123_000_000);
        let ts = b.created_at_utc().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn sorts_newest_first() {
        let mut list = vec![booking("old", 1), booking("new", 3), booking("mid", 2)];
        sort_newest_first(&mut list);
        let ids: Vec<_> = list.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }
}
