//! Price analysis and threshold decisions

use crate::shared::types::{AlertDecision, Direction, Price};
use crate::shared::utils::percent_change;

/// Analyzes cycle-over-cycle price moves
pub struct PriceAnalyzer;

impl PriceAnalyzer {
    /// Percent change against the previous sample, `None` on the first sample
    pub fn calculate_price_change(previous: Option<Price>, current: Price) -> Option<f64> {
        percent_change(previous, current)
    }

    pub fn is_significant_change(change_percentage: f64, threshold: f64) -> bool {
        change_percentage.abs() >= threshold
    }

    /// Cycle decision for a known change
    pub fn evaluate(change_percentage: f64, threshold: f64) -> AlertDecision {
        if Self::is_significant_change(change_percentage, threshold) {
            AlertDecision::CycleThresholdCrossed {
                direction: Direction::from_change(change_percentage),
                magnitude: change_percentage,
            }
        } else {
            AlertDecision::None
        }
    }
}
