//! Tunable constants for attenuation and phrasing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read perception config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse perception config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid perception config: {0}")]
    Invalid(String),
}

/// Configuration for propagation and strength banding.
///
/// Every field has a default, so a TOML file only needs the keys it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Strengths below this are neither delivered nor propagated.
    pub perceptibility_floor: f64,

    /// Sound loses this fraction of its strength per meter.
    pub sound_falloff: f64,

    /// Visual loses this fraction of its strength per meter.
    pub visual_falloff: f64,

    /// Minimum strength for the near description.
    pub near_threshold: f64,

    /// Minimum strength for the distant description.
    pub distant_threshold: f64,

    /// Speech at or above this is heard word for word.
    pub speech_verbatim: f64,

    /// Speech at or above this is heard partially.
    pub speech_garbled: f64,

    /// Below this a male or neuter voice loses its direction.
    pub speech_floor_male: f64,

    /// Below this a female voice loses its direction.
    pub speech_floor_female: f64,

    /// Word survival chance is `garble_scale * (strength - garble_offset)`.
    pub garble_scale: f64,
    pub garble_offset: f64,

    /// Movement identification ladder: name, then noun, then "someone".
    pub identify_name: f64,
    pub identify_noun: f64,
    pub identify_someone: f64,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            perceptibility_floor: 0.1,
            sound_falloff: 0.05,
            visual_falloff: 0.0005,
            near_threshold: 0.7,
            distant_threshold: 0.4,
            speech_verbatim: 0.8,
            speech_garbled: 0.5,
            speech_floor_male: 0.4,
            speech_floor_female: 0.3,
            garble_scale: 1.5,
            garble_offset: 0.2,
            identify_name: 0.8,
            identify_noun: 0.6,
            identify_someone: 0.4,
        }
    }
}

impl PerceptionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((name, _)) = self.fields().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be a finite number", name)));
        }
        if self.perceptibility_floor <= 0.0 {
            return Err(ConfigError::Invalid(
                "perceptibility_floor must be positive".to_string(),
            ));
        }
        if self.sound_falloff < 0.0 || self.visual_falloff < 0.0 {
            return Err(ConfigError::Invalid(
                "falloff coefficients must not be negative".to_string(),
            ));
        }

        let ladders: [(&str, &[f64]); 3] = [
            ("description", &[self.near_threshold, self.distant_threshold]),
            (
                "speech",
                &[
                    self.speech_verbatim,
                    self.speech_garbled,
                    self.speech_floor_male.max(self.speech_floor_female),
                ],
            ),
            (
                "identification",
                &[self.identify_name, self.identify_noun, self.identify_someone],
            ),
        ];
        for (name, thresholds) in ladders {
            if thresholds.windows(2).any(|w| w[0] < w[1]) {
                return Err(ConfigError::Invalid(format!(
                    "{} thresholds must be in descending order",
                    name
                )));
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 14] {
        [
            ("perceptibility_floor", self.perceptibility_floor),
            ("sound_falloff", self.sound_falloff),
            ("visual_falloff", self.visual_falloff),
            ("near_threshold", self.near_threshold),
            ("distant_threshold", self.distant_threshold),
            ("speech_verbatim", self.speech_verbatim),
            ("speech_garbled", self.speech_garbled),
            ("speech_floor_male", self.speech_floor_male),
            ("speech_floor_female", self.speech_floor_female),
            ("garble_scale", self.garble_scale),
            ("garble_offset", self.garble_offset),
            ("identify_name", self.identify_name),
            ("identify_noun", self.identify_noun),
            ("identify_someone", self.identify_someone),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PerceptionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PerceptionConfig::from_toml_str(
            r#"
            sound_falloff = 0.02
            speech_floor_female = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.sound_falloff, 0.02);
        assert_eq!(config.speech_floor_female, 0.25);
        assert_eq!(config.perceptibility_floor, 0.1);
        assert_eq!(config.visual_falloff, 0.0005);
    }

    #[test]
    fn test_rejects_bad_floor() {
        let err = PerceptionConfig::from_toml_str("perceptibility_floor = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let err = PerceptionConfig::from_toml_str(
            r#"
            near_threshold = 0.3
            distant_threshold = 0.6
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let err = PerceptionConfig::from_toml_str("garble_scale = nan").unwrap_err();
        assert!(err.to_string().contains("garble_scale"));

        let err = PerceptionConfig::from_toml_str("perceptibility_floor = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PerceptionConfig::from_toml_str("sound_falloff = inf").unwrap_err();
        assert!(err.to_string().contains("sound_falloff"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PerceptionConfig::from_toml_str("sound_falloff = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PerceptionConfig::load("/nonexistent/perception.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
