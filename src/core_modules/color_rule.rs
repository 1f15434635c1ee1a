// THEORY:
// Color classification is the first lens the extractor looks through. A chart draws
// each series in a flat, known color, so "is this pixel part of a bar?" reduces to
// "do all three channels fall inside a configured box?".
//
// Key architectural principles:
// 1.  **Rules are data**: Every threshold is a `ColorRule` value handed in by the
//     caller. There are no global constants the scan reads behind your back, so any
//     synthetic rule set can be tested.
// 2.  **Combined channel**: Several rules may be active at once (a stacked chart has
//     one color per series). A pixel matching *any* rule is a bar pixel. Which rule
//     matched is not part of the measurement.
// 3.  **First match wins**: Rules are evaluated in configuration order with a
//     short-circuit OR. Overlapping boxes are therefore deterministic, never an error.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::error::{ExtractionError, Result};
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range for one color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: Channel,
    pub max: Channel,
}

impl ChannelRange {
    pub const fn new(min: Channel, max: Channel) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: Channel) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A named bar category described by one inclusive range per channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRule {
    pub name: String,
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
}

impl ColorRule {
    pub fn new(name: impl Into<String>, red: ChannelRange, green: ChannelRange, blue: ChannelRange) -> Self {
        Self {
            name: name.into(),
            red,
            green,
            blue,
        }
    }

    /// Green "Leistung" bars of the my-PV ELWA daily energy chart.
    pub fn mypv_leistung() -> Self {
        Self::new(
            "leistung",
            ChannelRange::new(100, 180),
            ChannelRange::new(170, 230),
            ChannelRange::new(0, 80),
        )
    }

    /// Orange "Leistung 1" bars of the my-PV ELWA daily energy chart.
    pub fn mypv_leistung_1() -> Self {
        Self::new(
            "leistung-1",
            ChannelRange::new(200, 255),
            ChannelRange::new(140, 200),
            ChannelRange::new(0, 80),
        )
    }

    #[inline]
    pub fn matches(&self, pixel: &Pixel) -> bool {
        self.red.contains(pixel.red) && self.green.contains(pixel.green) && self.blue.contains(pixel.blue)
    }

    /// Rejects rules whose range is inverted on any channel; such a rule can never match.
    pub fn validate(&self) -> Result<()> {
        for (channel, range) in [("red", self.red), ("green", self.green), ("blue", self.blue)] {
            if range.min > range.max {
                return Err(ExtractionError::Configuration(format!(
                    "color rule '{}' has {} min {} above max {}",
                    self.name, channel, range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Decides whether a pixel belongs to any configured bar category.
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    rules: Vec<ColorRule>,
}

impl ColorClassifier {
    pub fn new(rules: Vec<ColorRule>) -> Self {
        Self { rules }
    }

    /// True iff at least one rule matches. Pure, no failure modes.
    #[inline]
    pub fn classify(&self, pixel: &Pixel) -> bool {
        self.rules.iter().any(|rule| rule.matches(pixel))
    }

    /// The first rule (in configuration order) the pixel matches, for diagnostics.
    pub fn matching_rule(&self, pixel: &Pixel) -> Option<&ColorRule> {
        self.rules.iter().find(|rule| rule.matches(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mypv() -> ColorClassifier {
        ColorClassifier::new(vec![ColorRule::mypv_leistung(), ColorRule::mypv_leistung_1()])
    }

    #[test]
    fn green_and_orange_bars_are_bar_pixels() {
        let classifier = mypv();
        assert!(classifier.classify(&Pixel::new(140, 200, 40)));
        assert!(classifier.classify(&Pixel::new(230, 170, 40)));
    }

    #[test]
    fn background_and_grid_lines_are_not() {
        let classifier = mypv();
        assert!(!classifier.classify(&Pixel::new(255, 255, 255)));
        assert!(!classifier.classify(&Pixel::new(200, 200, 200)));
        assert!(!classifier.classify(&Pixel::new(0, 0, 0)));
        // Red temperature line.
        assert!(!classifier.classify(&Pixel::new(220, 30, 30)));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let rule = ColorRule::mypv_leistung();
        assert!(rule.matches(&Pixel::new(100, 170, 0)));
        assert!(rule.matches(&Pixel::new(180, 230, 80)));
        assert!(!rule.matches(&Pixel::new(99, 170, 0)));
        assert!(!rule.matches(&Pixel::new(180, 231, 80)));
        assert!(!rule.matches(&Pixel::new(180, 230, 81)));
    }

    #[test]
    fn first_matching_rule_wins() {
        let wide = ColorRule::new(
            "wide",
            ChannelRange::new(0, 255),
            ChannelRange::new(0, 255),
            ChannelRange::new(0, 255),
        );
        let classifier = ColorClassifier::new(vec![ColorRule::mypv_leistung(), wide]);

        let green = Pixel::new(140, 200, 40);
        assert_eq!(classifier.matching_rule(&green).map(|r| r.name.as_str()), Some("leistung"));

        let white = Pixel::new(255, 255, 255);
        assert_eq!(classifier.matching_rule(&white).map(|r| r.name.as_str()), Some("wide"));
    }

    #[test]
    fn empty_classifier_matches_nothing() {
        let classifier = ColorClassifier::new(Vec::new());
        assert!(!classifier.classify(&Pixel::new(140, 200, 40)));
        assert!(classifier.matching_rule(&Pixel::new(140, 200, 40)).is_none());
    }

    #[test]
    fn inverted_range_fails_validation() {
        let rule = ColorRule::new(
            "broken",
            ChannelRange::new(0, 255),
            ChannelRange::new(200, 100),
            ChannelRange::new(0, 255),
        );
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("green min 200 above max 100"));
        assert!(ColorRule::mypv_leistung().validate().is_ok());
    }
}
