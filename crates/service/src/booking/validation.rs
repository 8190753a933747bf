use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use models::booking::{BookingFormInput, NewBooking};
use models::catalog::is_known_service;
use models::property::PropertyType;

use crate::estimate::parse_area;

// Indian mobile numbering: ten ASCII digits, leading 6-9.
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("compile mobile pattern"));

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    FullName,
    MobileNumber,
    Location,
    PropertyType,
    Service,
    Date,
    TimeSlot,
    Area,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::FullName => "fullName",
            BookingField::MobileNumber => "mobileNumber",
            BookingField::Location => "location",
            BookingField::PropertyType => "propertyType",
            BookingField::Service => "service",
            BookingField::Date => "date",
            BookingField::TimeSlot => "timeSlot",
            BookingField::Area => "area",
        }
    }
}

/// Outcome of one submission attempt. One message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<BookingField, String>,
}

impl ValidationResult {
    pub fn error(&self, field: BookingField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Validate against today's local calendar date.
pub fn validate_booking_form(input: &BookingFormInput) -> ValidationResult {
    validate_booking_form_on(input, Local::now().date_naive())
}

/// Validate every field; `today` is the earliest bookable date.
pub fn validate_booking_form_on(input: &BookingFormInput, today: NaiveDate) -> ValidationResult {
    let mut errors = BTreeMap::new();
    let checks = [
        (BookingField::FullName, check_full_name(&input.full_name)),
        (BookingField::MobileNumber, check_mobile_number(&input.mobile_number)),
        (BookingField::Location, check_location(&input.location)),
        (BookingField::PropertyType, check_property_type(&input.property_type)),
        (BookingField::Service, check_service(&input.service)),
        (BookingField::Date, check_date(&input.date, today)),
        (BookingField::TimeSlot, check_time_slot(&input.time_slot)),
        (BookingField::Area, check_area(&input.area)),
    ];
    for (field, outcome) in checks {
        if let Err(message) = outcome {
            errors.insert(field, message.to_string());
        }
    }
    ValidationResult { is_valid: errors.is_empty(), errors }
}

/// Validate and build the payload for `createBooking`.
pub fn prepare_submission(input: &BookingFormInput, today: NaiveDate) -> Result<NewBooking, ValidationResult> {
    let result = validate_booking_form_on(input, today);
    if !result.is_valid {
        return Err(result);
    }
    let area = parse_area(&input.area).map(|a| a.trunc() as u64).unwrap_or_default();
    Ok(NewBooking {
        full_name: input.full_name.trim().to_string(),
        mobile_number: input.mobile_number.trim().to_string(),
        location: input.location.trim().to_string(),
        property_type: input.property_type.clone(),
        service: input.service.clone(),
        date: input.date.trim().to_string(),
        time_slot: input.time_slot.clone(),
        area,
    })
}

type Check = Result<(), &'static str>;

fn check_full_name(value: &str) -> Check {
    let name = value.trim();
    if name.is_empty() {
        return Err("Full name is required");
    }
    // Length in UTF-16 code units, as the browser form measures it.
    if name.encode_utf16().count() < 2 {
        return Err("Full name must be at least 2 characters");
    }
    Ok(())
}

fn check_mobile_number(value: &str) -> Check {
    let number = value.trim();
    if number.is_empty() {
        return Err("Mobile number is required");
    }
    if !MOBILE_RE.is_match(number) {
        return Err("Please enter a valid 10-digit mobile number");
    }
    Ok(())
}

fn check_location(value: &str) -> Check {
    if value.trim().is_empty() {
        return Err("Location is required");
    }
    Ok(())
}

fn check_property_type(value: &str) -> Check {
    if value.is_empty() {
        return Err("Property type is required");
    }
    value
        .parse::<PropertyType>()
        .map(|_| ())
        .map_err(|_| "Please select a valid property type")
}

fn check_service(value: &str) -> Check {
    if value.is_empty() {
        return Err("Service selection is required");
    }
    if !is_known_service(value) {
        return Err("Please select a valid service");
    }
    Ok(())
}

fn check_date(value: &str, today: NaiveDate) -> Check {
    if value.trim().is_empty() {
        return Err("Date is required");
    }
    let selected = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| "Please select a valid date")?;
    if selected < today {
        return Err("Please select a future date");
    }
    Ok(())
}

fn check_time_slot(value: &str) -> Check {
    if value.is_empty() {
        return Err("Time slot is required");
    }
    Ok(())
}

fn check_area(value: &str) -> Check {
    if value.trim().is_empty() {
        return Err("Area is required");
    }
    if parse_area(value).is_none() {
        return Err("Please enter a valid area greater than 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_input() -> BookingFormInput {
        BookingFormInput {
            full_name: "Asha Rao".into(),
            mobile_number: "9876543210".into(),
            location: "Baner, Pune".into(),
            property_type: "Flat".into(),
            service: "POP & Gypsum".into(),
            date: "2026-10-25".into(),
            time_slot: "10:00 AM".into(),
            area: "250.5".into(),
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        let result = validate_booking_form_on(&valid_input(), today());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_form_reports_every_field() {
        let result = validate_booking_form_on(&BookingFormInput::default(), today());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 8);
        assert_eq!(result.error(BookingField::FullName), Some("Full name is required"));
        assert_eq!(result.error(BookingField::MobileNumber), Some("Mobile number is required"));
        assert_eq!(result.error(BookingField::Location), Some("Location is required"));
        assert_eq!(result.error(BookingField::PropertyType), Some("Property type is required"));
        assert_eq!(result.error(BookingField::Service), Some("Service selection is required"));
        assert_eq!(result.error(BookingField::Date), Some("Date is required"));
        assert_eq!(result.error(BookingField::TimeSlot), Some("Time slot is required"));
        assert_eq!(result.error(BookingField::Area), Some("Area is required"));
    }

    #[test]
    fn mobile_number_rules() {
        for bad in ["12345", "5123456789", "", "98765432101", "98765-4321"] {
            let mut input = valid_input();
            input.mobile_number = bad.into();
            let result = validate_booking_form_on(&input, today());
            assert!(!result.is_valid, "{bad:?} accepted");
            assert!(result.error(BookingField::MobileNumber).is_some());
        }
        let mut input = valid_input();
        input.mobile_number = " 9876543210 ".into();
        assert_eq!(validate_booking_form_on(&input, today()).error(BookingField::MobileNumber), None);
    }

    #[test]
    fn short_name_after_trim() {
        let mut input = valid_input();
        input.full_name = "  A ".into();
        let result = validate_booking_form_on(&input, today());
        assert_eq!(result.error(BookingField::FullName), Some("Full name must be at least 2 characters"));
    }

    #[test]
    fn name_length_counts_utf16_units() {
        let mut input = valid_input();
        input.full_name = "\u{1F600}".into();
        assert!(validate_booking_form_on(&input, today()).is_valid);

        input.full_name = " \u{e9} ".into();
        let result = validate_booking_form_on(&input, today());
        assert_eq!(result.error(BookingField::FullName), Some("Full name must be at least 2 characters"));
    }

    #[test]
    fn date_must_not_be_in_the_past() {
        let mut input = valid_input();
        input.date = (today() - Duration::days(1)).format(DATE_FORMAT).to_string();
        let result = validate_booking_form_on(&input, today());
        assert_eq!(result.error(BookingField::Date), Some("Please select a future date"));

        input.date = today().format(DATE_FORMAT).to_string();
        assert!(validate_booking_form_on(&input, today()).is_valid);

        input.date = (today() + Duration::days(30)).format(DATE_FORMAT).to_string();
        assert!(validate_booking_form_on(&input, today()).is_valid);

        input.date = "next tuesday".into();
        let result = validate_booking_form_on(&input, today());
        assert_eq!(result.error(BookingField::Date), Some("Please select a valid date"));
    }

    #[test]
    fn yesterday_rejected_against_system_clock() {
        let mut input = valid_input();
        let now = Local::now().date_naive();
        input.date = (now - Duration::days(1)).format(DATE_FORMAT).to_string();
        assert!(validate_booking_form(&input).error(BookingField::Date).is_some());
        input.date = now.format(DATE_FORMAT).to_string();
        assert!(validate_booking_form(&input).error(BookingField::Date).is_none());
    }

    #[test]
    fn unknown_choices_rejected() {
        let mut input = valid_input();
        input.property_type = "Villa".into();
        input.service = "Marble Flooring".into();
        let result = validate_booking_form_on(&input, today());
        assert_eq!(result.error(BookingField::PropertyType), Some("Please select a valid property type"));
        assert_eq!(result.error(BookingField::Service), Some("Please select a valid service"));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn area_must_be_positive_number() {
        for bad in ["0", "-3", "abc", "inf"] {
            let mut input = valid_input();
            input.area = bad.into();
            let result = validate_booking_form_on(&input, today());
            assert_eq!(
                result.error(BookingField::Area),
                Some("Please enter a valid area greater than 0"),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn errors_serialize_with_form_field_names() {
        let mut input = valid_input();
        input.location = " ".into();
        let json = serde_json::to_value(validate_booking_form_on(&input, today())).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"]["location"], "Location is required");
    }

    #[test]
    fn submission_truncates_area_and_trims_text() {
        let mut input = valid_input();
        input.full_name = " Asha Rao ".into();
        let booking = prepare_submission(&input, today()).unwrap();
        assert_eq!(booking.area, 250);
        assert_eq!(booking.full_name, "Asha Rao");

        input.time_slot.clear();
        let rejected = prepare_submission(&input, today()).unwrap_err();
        assert_eq!(rejected.error(BookingField::TimeSlot), Some("Time slot is required"));
    }
}
