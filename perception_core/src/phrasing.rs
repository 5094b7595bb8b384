//! Turning a strength into words.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PerceptionConfig;

/// Near, distant and very distant descriptions of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTiers {
    pub near: Option<String>,
    pub distant: Option<String>,
    pub very_distant: Option<String>,
}

impl DescriptionTiers {
    pub fn new(
        near: impl Into<String>,
        distant: impl Into<String>,
        very_distant: impl Into<String>,
    ) -> Self {
        Self {
            near: Some(near.into()),
            distant: Some(distant.into()),
            very_distant: Some(very_distant.into()),
        }
    }

    /// Pick the tier for `strength`. An unset tier falls back to the next
    /// stronger one, never to a weaker one.
    pub fn select(&self, strength: f64, config: &PerceptionConfig) -> Option<&str> {
        let near = self.near.as_deref();
        let distant = self.distant.as_deref().or(near);
        let very_distant = self.very_distant.as_deref().or(distant);

        if strength >= config.near_threshold {
            near
        } else if strength >= config.distant_threshold {
            distant
        } else {
            very_distant
        }
    }

    pub fn is_empty(&self) -> bool {
        self.near.is_none() && self.distant.is_none() && self.very_distant.is_none()
    }
}

/// Append `.` (or `!` when shouted) unless the text already ends a sentence.
pub fn terminate_sentence(text: &str, shouted: bool) -> String {
    let trimmed = text.trim_end();
    if trimmed.ends_with(&['.', '!', '?'][..]) {
        trimmed.to_string()
    } else if shouted {
        format!("{}!", trimmed)
    } else {
        format!("{}.", trimmed)
    }
}

/// Result of garbling a line of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Garbled {
    pub text: String,
    pub surviving_words: usize,
}

/// Chance that a single word is heard at `strength`, always within `0..=1`.
pub fn word_survival_chance(strength: f64, config: &PerceptionConfig) -> f64 {
    let chance = config.garble_scale * (strength - config.garble_offset);
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Replace each space-delimited word, independently, with dots of the same
/// length unless it survives the strength roll.
pub fn garble<R: Rng + ?Sized>(
    message: &str,
    strength: f64,
    config: &PerceptionConfig,
    rng: &mut R,
) -> Garbled {
    let chance = word_survival_chance(strength, config);
    let mut surviving_words = 0;

    let words: Vec<String> = message
        .split(' ')
        .map(|word| {
            if word.is_empty() {
                String::new()
            } else if rng.gen_bool(chance) {
                surviving_words += 1;
                word.to_string()
            } else {
                ".".repeat(word.chars().count())
            }
        })
        .collect();

    Garbled {
        text: words.join(" "),
        surviving_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tier_selection() {
        let config = PerceptionConfig::default();
        let tiers = DescriptionTiers::new("BANG!", "A bang.", "A faint thud.");

        assert_eq!(tiers.select(1.0, &config), Some("BANG!"));
        assert_eq!(tiers.select(0.7, &config), Some("BANG!"));
        assert_eq!(tiers.select(0.5, &config), Some("A bang."));
        assert_eq!(tiers.select(0.4, &config), Some("A bang."));
        assert_eq!(tiers.select(0.2, &config), Some("A faint thud."));
    }

    #[test]
    fn test_tier_falls_back_upward() {
        let config = PerceptionConfig::default();
        let tiers = DescriptionTiers {
            near: Some("Crash.".to_string()),
            ..Default::default()
        };

        assert_eq!(tiers.select(0.5, &config), Some("Crash."));
        assert_eq!(tiers.select(0.1, &config), Some("Crash."));

        let only_far = DescriptionTiers {
            very_distant: Some("Rumble.".to_string()),
            ..Default::default()
        };
        assert_eq!(only_far.select(0.9, &config), None);
        assert_eq!(only_far.select(0.2, &config), Some("Rumble."));
        assert!(DescriptionTiers::default().is_empty());
    }

    #[test]
    fn test_terminate_sentence() {
        assert_eq!(terminate_sentence("Hello", false), "Hello.");
        assert_eq!(terminate_sentence("Help", true), "Help!");
        assert_eq!(terminate_sentence("Ready?", false), "Ready?");
        assert_eq!(terminate_sentence("Done.  ", true), "Done.");
    }

    #[test]
    fn test_unvalidated_nan_config_garbles_everything() {
        let config = PerceptionConfig {
            garble_scale: f64::NAN,
            ..Default::default()
        };
        assert_eq!(word_survival_chance(0.65, &config), 0.0);

        let mut rng = StdRng::seed_from_u64(1);
        let heard = garble("over here", 0.65, &config, &mut rng);
        assert_eq!(heard.text, ".... ....");
        assert_eq!(heard.surviving_words, 0);
    }

    #[test]
    fn test_survival_chance() {
        let config = PerceptionConfig::default();
        assert!((word_survival_chance(0.65, &config) - 0.675).abs() < 1e-9);
        assert_eq!(word_survival_chance(0.1, &config), 0.0);
        assert_eq!(word_survival_chance(1.0, &config), 1.0);
    }

    #[test]
    fn test_garble_preserves_shape() {
        let config = PerceptionConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let message = "the quick brown fox jumps over the lazy dog";

        for _ in 0..20 {
            let garbled = garble(message, 0.65, &config, &mut rng);
            let original: Vec<_> = message.split(' ').collect();
            let heard: Vec<_> = garbled.text.split(' ').collect();

            assert_eq!(heard.len(), original.len());
            for (o, h) in original.iter().zip(&heard) {
                assert_eq!(o.len(), h.len());
                assert!(h == o || h.chars().all(|c| c == '.'));
            }
            let kept = original.iter().zip(&heard).filter(|(o, h)| o == h).count();
            assert_eq!(kept, garbled.surviving_words);
        }
    }

    #[test]
    fn test_garble_extremes() {
        let config = PerceptionConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        let lost = garble("hello there", 0.2, &config, &mut rng);
        assert_eq!(lost.text, "..... .....");
        assert_eq!(lost.surviving_words, 0);

        let kept = garble("hello there", 0.9, &config, &mut rng);
        assert_eq!(kept.text, "hello there");
        assert_eq!(kept.surviving_words, 2);
    }
}
