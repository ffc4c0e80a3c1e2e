//! Common types used across the application

use chrono::{DateTime, Utc};
use std::fmt;

/// Subnet identifier (netuid)
pub type SubnetId = u16;

/// Price representation, denominated in TAO
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price {
    pub value: f64,
}

impl Price {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "τ{:.6}", self.value)
    }
}

/// One successful read from the price feed
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    pub subnet: SubnetId,
    pub price: Price,
    /// Subnet name reported by the feed, if any
    pub name: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSample {
    pub fn new(subnet: SubnetId, price: f64, name: Option<String>) -> Self {
        Self {
            subnet,
            price: Price::new(price),
            name,
            fetched_at: Utc::now(),
        }
    }
}

/// Direction of a price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Strictly positive changes are `Up`, everything else `Down`.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Outcome of evaluating one subnet against one of the thresholds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AlertDecision {
    #[default]
    None,
    CycleThresholdCrossed { direction: Direction, magnitude: f64 },
    BaselineThresholdCrossed { direction: Direction, magnitude: f64 },
}

impl AlertDecision {
    pub fn is_triggered(&self) -> bool {
        !matches!(self, AlertDecision::None)
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            AlertDecision::None => None,
            AlertDecision::CycleThresholdCrossed { direction, .. }
            | AlertDecision::BaselineThresholdCrossed { direction, .. } => Some(*direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_change() {
        assert_eq!(Direction::from_change(5.0), Direction::Up);
        assert_eq!(Direction::from_change(-0.1), Direction::Down);
        assert_eq!(Direction::from_change(0.0), Direction::Down);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(1.5).to_string(), "τ1.500000");
    }

    #[test]
    fn test_alert_decision_direction() {
        let decision = AlertDecision::BaselineThresholdCrossed {
            direction: Direction::Down,
            magnitude: -15.0,
        };
        assert!(decision.is_triggered());
        assert_eq!(decision.direction(), Some(Direction::Down));
        assert_eq!(AlertDecision::None.direction(), None);
        assert_eq!(AlertDecision::default(), AlertDecision::None);
    }
}
