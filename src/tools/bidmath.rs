//! Client-side bid arithmetic: the display math the pages perform locally.
//! Authoritative totals always come from the backend; these helpers exist so
//! forms and cards can show live figures without a round trip.

use chrono::{DateTime, Utc};

use crate::api::models::BoqItem;

/// GST applied on BOQ totals.
pub const GST_RATE: f64 = 0.18;

const DEFAULT_SD_PERCENTAGE: f64 = 10.0;

/// Earnest money deposit: `tender_value * percentage / 100`.
pub fn emd_amount(tender_value: f64, emd_percentage: f64) -> f64 {
    tender_value * emd_percentage / 100.0
}

/// Security deposit at an explicit percentage.
pub fn security_deposit(tender_value: f64, sd_percentage: f64) -> f64 {
    tender_value * sd_percentage / 100.0
}

/// Security deposit at the standard 10%.
pub fn default_security_deposit(tender_value: f64) -> f64 {
    security_deposit(tender_value, DEFAULT_SD_PERCENTAGE)
}

pub fn boq_subtotal(items: &[BoqItem]) -> f64 {
    items.iter().map(|i| i.quantity * i.rate).sum()
}

pub fn gst_amount(subtotal: f64) -> f64 {
    subtotal * GST_RATE
}

pub fn grand_total(subtotal: f64) -> f64 {
    subtotal + gst_amount(subtotal)
}

/// Whole days remaining until the deadline, rounded up; zero or negative
/// means the tender has expired.
pub fn days_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (deadline - now).num_milliseconds() as f64;
    (ms / 86_400_000.0).ceil() as i64
}

/// Radius of the win-probability gauge circle.
const GAUGE_RADIUS: f64 = 54.0;

/// Win-probability percentage to SVG stroke-dasharray: `(arc, circumference)`
/// over the radius-54 gauge circle. Probability is clamped to 0..=100.
pub fn gauge_arc(probability: f64) -> (f64, f64) {
    let circumference = 2.0 * std::f64::consts::PI * GAUGE_RADIUS;
    let p = probability.clamp(0.0, 100.0);
    (circumference * p / 100.0, circumference)
}

/// Indian-grouping currency display with no fraction digits: 100000 becomes
/// `₹1,00,000`. Matches `Intl.NumberFormat('en-IN')` for whole rupees.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<String> = Vec::new();
        let head_bytes = head.as_bytes();
        let mut i = head_bytes.len();
        while i > 2 {
            parts.push(String::from_utf8_lossy(&head_bytes[i - 2..i]).into_owned());
            i -= 2;
        }
        parts.push(String::from_utf8_lossy(&head_bytes[..i]).into_owned());
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };
    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(q: f64, rate: f64) -> BoqItem {
        BoqItem { description: "x".into(), unit: "Nos".into(), quantity: q, rate }
    }

    #[test]
    fn emd_at_two_percent_of_fifty_lakh() {
        assert_eq!(emd_amount(5_000_000.0, 2.0), 100_000.0);
        assert_eq!(emd_amount(0.0, 2.0), 0.0);
        assert_eq!(default_security_deposit(5_000_000.0), 500_000.0);
    }

    #[test]
    fn boq_totals_with_gst() {
        let items = vec![item(10.0, 250.0), item(4.0, 1_500.0)];
        let subtotal = boq_subtotal(&items);
        assert_eq!(subtotal, 8_500.0);
        assert!((gst_amount(subtotal) - 1_530.0).abs() < 1e-9);
        assert!((grand_total(subtotal) - 10_030.0).abs() < 1e-9);
        assert_eq!(boq_subtotal(&[]), 0.0);
    }

    #[test]
    fn days_left_rounds_up_and_goes_negative_past_deadline() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let deadline = Utc.with_ymd_and_hms(2025, 6, 4, 18, 0, 0).unwrap();
        assert_eq!(days_left(deadline, now), 4); // 3.25 days rounds up
        let past = Utc.with_ymd_and_hms(2025, 5, 30, 12, 0, 0).unwrap();
        assert_eq!(days_left(past, now), -2);
        assert_eq!(days_left(now, now), 0);
    }

    #[test]
    fn gauge_arc_fraction_of_circumference() {
        let (arc, circ) = gauge_arc(50.0);
        assert!((circ - 2.0 * std::f64::consts::PI * 54.0).abs() < 1e-9);
        assert!((arc - circ / 2.0).abs() < 1e-9);
        assert_eq!(gauge_arc(0.0).0, 0.0);
        let (full, circ) = gauge_arc(150.0);
        assert!((full - circ).abs() < 1e-9);
    }

    #[test]
    fn inr_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(950.0), "₹950");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(5_000_000.0), "₹50,00,000");
        assert_eq!(format_inr(12_345_678.0), "₹1,23,45,678");
        assert_eq!(format_inr(-4_500.0), "-₹4,500");
    }
}
