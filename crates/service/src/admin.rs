//! Admin dashboard helpers: bookings export and upload naming.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use models::booking::Booking;

const CSV_HEADERS: [&str; 10] = [
    "ID",
    "Full Name",
    "Mobile Number",
    "Location",
    "Property Type",
    "Service",
    "Date",
    "Time Slot",
    "Area (sq.ft)",
    "Created At",
];

static UNSAFE_FILE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.-]").expect("static pattern"));

/// Bookings as CSV, one row per booking in the given order. Every cell is quoted.
pub fn bookings_csv(bookings: &[Booking]) -> String {
    let mut out = csv_row(CSV_HEADERS.iter().map(|h| h.to_string()));
    for b in bookings {
        let created = b
            .created_at_utc()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        out.push_str(&csv_row([
            b.id.clone(),
            b.full_name.clone(),
            b.mobile_number.clone(),
            b.location.clone(),
            b.property_type.clone(),
            b.service.clone(),
            b.date.clone(),
            b.time_slot.clone(),
            b.area.to_string(),
            created,
        ]));
    }
    out
}

fn csv_row(cells: impl IntoIterator<Item = String>) -> String {
    let mut row = cells
        .into_iter()
        .map(|c| format!("\"{}\"", c.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("bookings_{}.csv", date.format("%Y-%m-%d"))
}

/// Storage path for an uploaded image: `/uploads/{timestamp_ms}_{name}` with
/// anything outside `[a-zA-Z0-9.-]` replaced by `_`.
pub fn upload_path(file_name: &str, timestamp_ms: i64) -> String {
    let safe = UNSAFE_FILE_CHARS.replace_all(file_name, "_");
    format!("/uploads/{timestamp_ms}_{safe}")
}
