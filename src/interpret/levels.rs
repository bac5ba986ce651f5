// Discrete display levels derived from a classification.

use serde::{Deserialize, Serialize};

use crate::backend::Prediction;

/// How risky the file is, for display. Follows the prediction directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    pub fn from_prediction(prediction: Prediction) -> Self {
        match prediction {
            Prediction::Malicious => RiskLevel::High,
            Prediction::Benign => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::High => "HIGH RISK",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::High => {
                "This file shows characteristics commonly associated with malicious \
                 software. Exercise caution."
            }
            RiskLevel::Low => {
                "This file appears to be safe based on the analyzed characteristics."
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color bucket for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Bucket a confidence score. Each tier includes its lower bound.
    pub fn from_confidence(confidence: f64) -> Self {
        match confidence {
            c if c >= 0.8 => ConfidenceTier::High,
            c if c >= 0.6 => ConfidenceTier::Medium,
            _ => ConfidenceTier::Low,
        }
    }

    /// CSS color of the tier: green, yellow or red.
    pub fn hex_color(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "#28a745",
            ConfidenceTier::Medium => "#ffc107",
            ConfidenceTier::Low => "#dc3545",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_follows_prediction() {
        assert_eq!(RiskLevel::from_prediction(Prediction::Malicious), RiskLevel::High);
        assert_eq!(RiskLevel::from_prediction(Prediction::Benign), RiskLevel::Low);
    }

    #[test]
    fn test_tier_lower_bounds_are_inclusive() {
        assert_eq!(ConfidenceTier::from_confidence(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.6), ConfidenceTier::Medium);
    }

    #[test]
    fn test_tier_just_below_bounds() {
        assert_eq!(ConfidenceTier::from_confidence(0.7999), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.5999), ConfidenceTier::Low);
    }

    #[test]
    fn test_tier_nan_is_low() {
        assert_eq!(ConfidenceTier::from_confidence(f64::NAN), ConfidenceTier::Low);
    }
}
