//! Perceptual channels and the per-channel multiplier tables rooms and portals carry.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The medium a perception travels through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sound,
    Visual,
    Flood,
    /// Area-wide announcements; never attenuated.
    Area,
}

impl Channel {
    pub const COUNT: usize = 4;

    pub const ALL: [Channel; Channel::COUNT] =
        [Channel::Sound, Channel::Visual, Channel::Flood, Channel::Area];

    fn index(self) -> usize {
        match self {
            Channel::Sound => 0,
            Channel::Visual => 1,
            Channel::Flood => 2,
            Channel::Area => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Sound => "sound",
            Channel::Visual => "visual",
            Channel::Flood => "flood",
            Channel::Area => "area",
        }
    }

    pub fn from_name(name: &str) -> Option<Channel> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Hook invoked on non-player occupants who perceive this channel.
    pub fn hook_name(&self) -> &'static str {
        match self {
            Channel::Sound => "onsound",
            Channel::Visual | Channel::Area => "onvisual",
            Channel::Flood => "onflood",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size multiplier table keyed by channel. Every entry defaults to 1.0.
///
/// Serializes as a `channel name -> multiplier` map. Names that are not a known
/// channel are dropped on the way in, leaving that slot at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ChannelMultiplierMap {
    values: [f64; Channel::COUNT],
}

impl ChannelMultiplierMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: Channel) -> f64 {
        self.values[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, multiplier: f64) {
        self.values[channel.index()] = multiplier;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, channel: Channel, multiplier: f64) -> Self {
        self.set(channel, multiplier);
        self
    }

    /// Whether every channel still has the neutral multiplier.
    pub fn is_neutral(&self) -> bool {
        self.values.iter().all(|v| *v == 1.0)
    }
}

impl Default for ChannelMultiplierMap {
    fn default() -> Self {
        Self {
            values: [1.0; Channel::COUNT],
        }
    }
}

impl From<HashMap<String, f64>> for ChannelMultiplierMap {
    fn from(raw: HashMap<String, f64>) -> Self {
        let mut map = Self::default();
        for (name, value) in raw {
            if let Some(channel) = Channel::from_name(&name) {
                map.set(channel, value);
            }
        }
        map
    }
}

impl From<ChannelMultiplierMap> for BTreeMap<String, f64> {
    fn from(map: ChannelMultiplierMap) -> Self {
        Channel::ALL
            .into_iter()
            .map(|c| (c.name().to_string(), map.get(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_one() {
        let map = ChannelMultiplierMap::new();
        for channel in Channel::ALL {
            assert_eq!(map.get(channel), 1.0);
        }
        assert!(map.is_neutral());
    }

    #[test]
    fn test_set_and_equality() {
        let a = ChannelMultiplierMap::new().with(Channel::Sound, 0.5);
        let mut b = ChannelMultiplierMap::new();
        assert_ne!(a, b);

        b.set(Channel::Sound, 0.5);
        assert_eq!(a, b);
        assert_eq!(b.get(Channel::Sound), 0.5);
        assert_eq!(b.get(Channel::Visual), 1.0);
        assert!(!b.is_neutral());
    }

    #[test]
    fn test_serialized_as_named_map() {
        let map = ChannelMultiplierMap::new().with(Channel::Visual, 0.25);
        let json = serde_json::to_value(map).unwrap();

        assert_eq!(json["visual"], 0.25);
        assert_eq!(json["sound"], 1.0);

        let back: ChannelMultiplierMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_unknown_keys_default() {
        let map: ChannelMultiplierMap =
            serde_json::from_str(r#"{"sound": 0.3, "smell": 0.0}"#).unwrap();
        assert_eq!(map.get(Channel::Sound), 0.3);
        assert_eq!(map.get(Channel::Visual), 1.0);
        assert_eq!(map.get(Channel::Flood), 1.0);
    }

    #[test]
    fn test_hook_names() {
        assert_eq!(Channel::Sound.hook_name(), "onsound");
        assert_eq!(Channel::Visual.hook_name(), "onvisual");
        assert_eq!(Channel::Flood.hook_name(), "onflood");
    }

    #[test]
    fn test_channel_names_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_name(channel.name()), Some(channel));
        }
        assert_eq!(Channel::from_name("smell"), None);
    }
}
