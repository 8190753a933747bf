//! Live estimate calculator.
//!
//! Everything here is a soft display fallback: bad input yields `None`, never
//! an error.

use models::catalog::find_service;
use models::rates::ServiceRate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// Price in rupees; not rounded.
    Amount(f64),
    InspectionRequired,
}

/// Parse a square-footage field. Only finite values above zero are accepted.
pub fn parse_area(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|area| area.is_finite() && *area > 0.0)
}

/// Estimate the cost of `service_id` over `area_text` square feet.
///
/// Live `rates` win over the catalog default for the service's rate key.
///
/// # Examples
/// ```
/// use models::rates::ServiceRate;
/// use service::estimate::{estimate, Estimate};
/// let rates = ServiceRate { pop_gypsum: 65, pvc: 110, wall_molding: 100 };
/// assert_eq!(estimate("POP & Gypsum", "100", Some(&rates)), Some(Estimate::Amount(6500.0)));
/// assert_eq!(estimate("Gypsum Repair", "100", None), Some(Estimate::InspectionRequired));
/// ```
pub fn estimate(service_id: &str, area_text: &str, rates: Option<&ServiceRate>) -> Option<Estimate> {
    let area = parse_area(area_text)?;
    let service = find_service(service_id)?;
    if service.is_inspection_based() {
        return Some(Estimate::InspectionRequired);
    }
    let live = service
        .rate_key()
        .and_then(|key| rates.and_then(|r| r.get(key)));
    let rate = live.or_else(|| service.default_rate())?;
    Some(Estimate::Amount(area * rate as f64))
}

/// Render an amount as Indian rupees: `₹1,23,456.5`.
///
/// Rounds to paise for display only; trailing zero decimals are dropped.
pub fn format_inr(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;

    let grouped = group_indian(rupees);
    let decimals = match fraction {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{f:02}"),
    };
    format!("{sign}₹{grouped}{decimals}")
}

// Last three digits, then pairs: 12,34,567.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::catalog::SERVICES;

    const LIVE: ServiceRate = ServiceRate { pop_gypsum: 70, pvc: 120, wall_molding: 95 };

    #[test]
    fn inspection_services_ignore_area_and_rates() {
        for service in SERVICES.iter().filter(|s| s.is_inspection_based()) {
            for area in ["1", "250.5", "10000"] {
                assert_eq!(estimate(service.id, area, Some(&LIVE)), Some(Estimate::InspectionRequired));
                assert_eq!(estimate(service.id, area, None), Some(Estimate::InspectionRequired));
            }
        }
    }

    #[test]
    fn priced_services_multiply_area_by_rate() {
        for service in SERVICES.iter().filter(|s| !s.is_inspection_based()) {
            let key = service.rate_key().unwrap();
            let live = LIVE.get(key).unwrap() as f64;
            let default = service.default_rate().unwrap() as f64;
            assert_eq!(estimate(service.id, "12.5", Some(&LIVE)), Some(Estimate::Amount(12.5 * live)));
            assert_eq!(estimate(service.id, "12.5", None), Some(Estimate::Amount(12.5 * default)));
        }
    }

    #[test]
    fn pop_gypsum_hundred_square_feet() {
        let rates = ServiceRate { pop_gypsum: 65, pvc: 110, wall_molding: 100 };
        assert_eq!(estimate("POP & Gypsum", "100", Some(&rates)), Some(Estimate::Amount(6500.0)));
    }

    #[test]
    fn zero_live_rate_falls_back_to_default() {
        let rates = ServiceRate { pop_gypsum: 0, pvc: 110, wall_molding: 100 };
        assert_eq!(estimate("POP & Gypsum", "10", Some(&rates)), Some(Estimate::Amount(650.0)));
    }

    #[test]
    fn no_estimate_for_bad_input() {
        assert_eq!(estimate("Marble Flooring", "100", Some(&LIVE)), None);
        assert_eq!(estimate("PVC", "0", Some(&LIVE)), None);
        assert_eq!(estimate("PVC", "-5", Some(&LIVE)), None);
        assert_eq!(estimate("PVC", "abc", Some(&LIVE)), None);
        assert_eq!(estimate("PVC", "", Some(&LIVE)), None);
        assert_eq!(estimate("PVC", "inf", Some(&LIVE)), None);
        assert_eq!(estimate("PVC", "NaN", Some(&LIVE)), None);
    }

    #[test]
    fn formats_with_indian_grouping() {
        assert_eq!(format_inr(6500.0), "₹6,500");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(123456.75), "₹1,23,456.75");
        assert_eq!(format_inr(1234567.5), "₹12,34,567.5");
        assert_eq!(format_inr(1050.25), "₹1,050.25");
    }
}
