//! Insight Generator
//!
//! Turns correlation coefficients into human-readable insights using
//! per-pair significance thresholds and direction-specific wording.

use crate::analysis::correlations::{CorrelationPair, PairCorrelation};
use serde::Serialize;

/// Coarse strength classification of a coefficient
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    /// Classify by absolute coefficient magnitude
    pub fn from_coefficient(r: f64) -> Self {
        let abs_r = r.abs();
        if abs_r < 0.3 {
            Strength::Weak
        } else if abs_r < 0.5 {
            Strength::Moderate
        } else if abs_r < 0.7 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Weak => write!(f, "weak"),
            Strength::Moderate => write!(f, "moderate"),
            Strength::Strong => write!(f, "strong"),
            Strength::VeryStrong => write!(f, "very strong"),
        }
    }
}

/// What an insight is about
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Weather,
    SunExposure,
    AirQuality,
    ScreenTime,
    Media,
}

/// A threshold-gated interpretation of one correlation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    /// Signed Pearson coefficient behind this insight
    pub coefficient: f64,
    pub strength: Strength,
}

/// Wording and threshold for one correlation pair
struct InsightRule {
    threshold: f64,
    category: InsightCategory,
    positive: (&'static str, &'static str),
    negative: (&'static str, &'static str),
}

/// Rule for a pair, if that pair produces insights at all
fn rule_for(pair: CorrelationPair) -> Option<InsightRule> {
    let rule = match pair {
        CorrelationPair::TemperatureActivity => InsightRule {
            threshold: 0.30,
            category: InsightCategory::Weather,
            positive: (
                "Warm Weather Boost",
                "You tend to be more active on warmer days",
            ),
            negative: (
                "Cool Weather Energy",
                "You tend to be more active on cooler days",
            ),
        },
        CorrelationPair::UvActivity => InsightRule {
            threshold: 0.25,
            category: InsightCategory::SunExposure,
            positive: (
                "Sunshine Seeker",
                "Your activity rises on days with a higher UV index",
            ),
            negative: (
                "Shade Preference",
                "Your activity drops on days with a higher UV index",
            ),
        },
        CorrelationPair::AirQualityActivity => InsightRule {
            threshold: 0.20,
            category: InsightCategory::AirQuality,
            positive: (
                "Undeterred by Air Quality",
                "Your activity stays higher even on days with poorer air quality",
            ),
            negative: (
                "Air Quality Sensitivity",
                "You are less active on days with poorer air quality",
            ),
        },
        CorrelationPair::TemperatureScreenTime => InsightRule {
            threshold: 0.25,
            category: InsightCategory::ScreenTime,
            positive: (
                "Warm Weather Screens",
                "You spend more screen time in warmer weather",
            ),
            negative: (
                "Cold Weather Screens",
                "You spend more screen time in colder weather",
            ),
        },
        CorrelationPair::TemperatureMedia => InsightRule {
            threshold: 0.25,
            category: InsightCategory::Media,
            positive: (
                "Summer Streaming",
                "You consume more media in warmer weather",
            ),
            negative: (
                "Cozy Season Media",
                "You consume more media in colder weather",
            ),
        },
        CorrelationPair::TemperatureSteps | CorrelationPair::HumidityActivity => return None,
    };
    Some(rule)
}

/// Rule-based insight generation from correlation results
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate insights in the order the correlations are given
    ///
    /// A pair yields an insight only when |r| reaches its threshold.
    pub fn generate(&self, correlations: &[PairCorrelation]) -> Vec<Insight> {
        correlations
            .iter()
            .filter_map(|c| self.insight_for(c.pair, c.correlation.coefficient))
            .collect()
    }

    /// Insight for a single pair and coefficient
    pub fn insight_for(&self, pair: CorrelationPair, r: f64) -> Option<Insight> {
        let rule = rule_for(pair)?;
        if r.is_nan() || r.abs() < rule.threshold {
            return None;
        }

        let strength = Strength::from_coefficient(r);
        let (title, text) = if r > 0.0 { rule.positive } else { rule.negative };

        Some(Insight {
            title: title.to_string(),
            description: format!("{} ({} correlation, r = {:.2}).", text, strength, r),
            category: rule.category,
            coefficient: r,
            strength,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::correlations::{Correlation, CorrelationStatus};

    fn pair(pair: CorrelationPair, coefficient: f64) -> PairCorrelation {
        let (attribute_x, attribute_y) = pair.attributes();
        PairCorrelation {
            pair,
            correlation: Correlation {
                attribute_x,
                attribute_y,
                coefficient,
                sample_size: 30,
                status: CorrelationStatus::Computed,
            },
        }
    }

    #[test]
    fn test_strength_classification() {
        assert_eq!(Strength::from_coefficient(0.2), Strength::Weak);
        assert_eq!(Strength::from_coefficient(-0.29), Strength::Weak);
        assert_eq!(Strength::from_coefficient(0.3), Strength::Moderate);
        assert_eq!(Strength::from_coefficient(-0.49), Strength::Moderate);
        assert_eq!(Strength::from_coefficient(0.5), Strength::Strong);
        assert_eq!(Strength::from_coefficient(0.69), Strength::Strong);
        assert_eq!(Strength::from_coefficient(-0.7), Strength::VeryStrong);
        assert_eq!(Strength::from_coefficient(1.0), Strength::VeryStrong);
    }

    #[test]
    fn test_per_pair_thresholds() {
        let generator = InsightGenerator::new();

        assert!(generator.insight_for(CorrelationPair::TemperatureActivity, 0.29).is_none());
        assert!(generator.insight_for(CorrelationPair::TemperatureActivity, 0.30).is_some());
        assert!(generator.insight_for(CorrelationPair::UvActivity, 0.24).is_none());
        assert!(generator.insight_for(CorrelationPair::UvActivity, -0.25).is_some());
        assert!(generator.insight_for(CorrelationPair::AirQualityActivity, 0.19).is_none());
        assert!(generator.insight_for(CorrelationPair::AirQualityActivity, 0.21).is_some());
        assert!(generator.insight_for(CorrelationPair::TemperatureScreenTime, 0.25).is_some());
        assert!(generator.insight_for(CorrelationPair::TemperatureMedia, -0.24).is_none());
    }

    #[test]
    fn test_pairs_without_rules_never_produce_insights() {
        let generator = InsightGenerator::new();
        assert!(generator.insight_for(CorrelationPair::TemperatureSteps, 0.95).is_none());
        assert!(generator.insight_for(CorrelationPair::HumidityActivity, -0.95).is_none());
    }

    #[test]
    fn test_direction_wording() {
        let generator = InsightGenerator::new();

        let warm = generator
            .insight_for(CorrelationPair::TemperatureActivity, 0.6)
            .unwrap();
        assert!(warm.description.contains("warmer days"));
        assert_eq!(warm.category, InsightCategory::Weather);
        assert_eq!(warm.strength, Strength::Strong);

        let cool = generator
            .insight_for(CorrelationPair::TemperatureActivity, -0.6)
            .unwrap();
        assert!(cool.description.contains("cooler days"));
        assert_eq!(cool.coefficient, -0.6);

        let screens = generator
            .insight_for(CorrelationPair::TemperatureScreenTime, 0.4)
            .unwrap();
        assert!(screens.description.contains("more screen time in warmer weather"));
    }

    #[test]
    fn test_air_quality_insight_can_be_weak() {
        let insight = InsightGenerator::new()
            .insight_for(CorrelationPair::AirQualityActivity, -0.22)
            .unwrap();
        assert_eq!(insight.strength, Strength::Weak);
        assert_eq!(insight.category, InsightCategory::AirQuality);
    }

    #[test]
    fn test_generate_preserves_evaluation_order() {
        let correlations = vec![
            pair(CorrelationPair::TemperatureActivity, 0.35),
            pair(CorrelationPair::TemperatureSteps, 0.9),
            pair(CorrelationPair::HumidityActivity, 0.1),
            pair(CorrelationPair::UvActivity, 0.1),
            pair(CorrelationPair::AirQualityActivity, -0.8),
            pair(CorrelationPair::TemperatureScreenTime, 0.0),
            pair(CorrelationPair::TemperatureMedia, 0.5),
        ];

        let insights = InsightGenerator::new().generate(&correlations);
        let categories: Vec<InsightCategory> = insights.iter().map(|i| i.category).collect();

        // Not sorted by magnitude
        assert_eq!(
            categories,
            vec![
                InsightCategory::Weather,
                InsightCategory::AirQuality,
                InsightCategory::Media
            ]
        );
    }

    #[test]
    fn test_insight_serializes() {
        let insight = InsightGenerator::new()
            .insight_for(CorrelationPair::UvActivity, 0.72)
            .unwrap();

        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains("\"category\":\"sun_exposure\""));
        assert!(json.contains("\"strength\":\"very_strong\""));
    }
}
