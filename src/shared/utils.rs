//! Utility functions and helpers

use crate::shared::types::Price;

const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Calculate percentage change.
///
/// Returns `None` when there is no meaningful reference (`old_value == 0`).
pub fn calculate_percentage_change(old_value: f64, new_value: f64) -> Option<f64> {
    if old_value == 0.0 {
        return None;
    }
    Some(((new_value - old_value) / old_value) * 100.0)
}

/// Percentage change between two optional prices
pub fn percent_change(old: Option<Price>, new: Price) -> Option<f64> {
    old.and_then(|old| calculate_percentage_change(old.value, new.value))
}

/// Format a price line, optionally with the change over the last interval
pub fn format_price_message(
    price: Price,
    change: Option<f64>,
    interval_secs: u64,
    important: bool,
) -> String {
    let mut message = price.to_string();
    if let Some(change) = change {
        if change != 0.0 {
            let color = if change > 0.0 { GREEN } else { RED };
            message.push_str(&format!(
                " -> Change last {}s: {}{:+.6}%{}",
                interval_secs, color, change, RESET
            ));
        } else {
            message.push_str(&format!(" -> Change last {}s: {:+.6}%", interval_secs, change));
        }
        if important {
            message.push_str(" 🔔 Significant Change!");
        }
    }
    message
}

/// Pad a subnet label and highlight it
pub fn format_subnet_line(label: &str, message: &str, important: bool) -> String {
    if important {
        format!("{}{:<20} {}{}", BOLD, label, message, RESET)
    } else {
        format!("{:<20} {}", label, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_change_matches_formula() {
        let cases = [(10.0, 10.5), (1.0, 0.85), (0.003, 0.0042), (250.0, 1.0)];
        for (old, new) in cases {
            let change = calculate_percentage_change(old, new).unwrap();
            assert!((change - (new - old) / old * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_percentage_change_zero_reference() {
        assert_eq!(calculate_percentage_change(0.0, 1.0), None);
        assert_eq!(percent_change(None, Price::new(1.0)), None);
    }

    #[test]
    fn test_same_price_is_zero_change() {
        let change = percent_change(Some(Price::new(12.5)), Price::new(12.5)).unwrap();
        assert_eq!(change, 0.0);
    }

    #[test]
    fn test_format_price_message() {
        let initial = format_price_message(Price::new(0.25), None, 60, false);
        assert_eq!(initial, "τ0.250000");

        let flat = format_price_message(Price::new(0.25), Some(0.0), 60, false);
        assert_eq!(flat, "τ0.250000 -> Change last 60s: +0.000000%");

        let up = format_price_message(Price::new(0.25), Some(5.0), 60, true);
        assert!(up.contains(GREEN));
        assert!(up.contains("+5.000000%"));
        assert!(up.ends_with("Significant Change!"));
    }
}
