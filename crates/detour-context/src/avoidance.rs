//! Local avoidance configuration sets
//!
//! A crowd simulator keeps a small table of obstacle avoidance parameter
//! sets, one per quality level. [`AvoidanceConfigSet`] is the authoring side
//! of that table: the context copies its entries into the simulator when the
//! crowd is built and keeps no link to it afterwards.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Parameters controlling velocity sampling during obstacle avoidance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct ObstacleAvoidanceParams {
    pub vel_bias: f32,       // Velocity bias
    pub weight_des_vel: f32, // Weight for desired velocity
    pub weight_cur_vel: f32, // Weight for current velocity
    pub weight_side: f32,    // Weight for side preference
    pub weight_toi: f32,     // Weight for time of impact
    pub horiz_time: f32,     // Horizon time
    pub grid_size: u8,       // Grid size for grid-based sampling
    pub adaptive_divs: u8,   // Adaptive divisions for adaptive sampling
    pub adaptive_rings: u8,  // Adaptive rings for adaptive sampling
    pub adaptive_depth: u8,  // Adaptive depth for adaptive sampling
}

impl Default for ObstacleAvoidanceParams {
    fn default() -> Self {
        Self {
            vel_bias: 0.4,
            weight_des_vel: 2.0,
            weight_cur_vel: 0.75,
            weight_side: 0.75,
            weight_toi: 2.5,
            horiz_time: 2.5,
            grid_size: 33,
            adaptive_divs: 7,
            adaptive_rings: 2,
            adaptive_depth: 5,
        }
    }
}

impl ObstacleAvoidanceParams {
    fn adaptive(divs: u8, rings: u8, depth: u8) -> Self {
        Self {
            vel_bias: 0.5,
            adaptive_divs: divs,
            adaptive_rings: rings,
            adaptive_depth: depth,
            ..Default::default()
        }
    }

    /// 11 samples per agent
    pub fn low() -> Self {
        Self::adaptive(5, 2, 1)
    }

    /// 22 samples per agent
    pub fn medium() -> Self {
        Self::adaptive(5, 2, 2)
    }

    /// 45 samples per agent
    pub fn good() -> Self {
        Self::adaptive(7, 2, 3)
    }

    /// 66 samples per agent
    pub fn high() -> Self {
        Self::adaptive(7, 3, 3)
    }
}

/// A named avoidance parameter set
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AvoidanceConfig {
    pub name: String,
    pub params: ObstacleAvoidanceParams,
}

impl AvoidanceConfig {
    pub fn new(name: impl Into<String>, params: ObstacleAvoidanceParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Fixed-capacity table of avoidance configurations indexed by slot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AvoidanceConfigSet {
    slots: Vec<AvoidanceConfig>,
}

impl AvoidanceConfigSet {
    /// Default number of slots in a set
    pub const MAX_COUNT: usize = 8;

    /// Creates a set of `count` slots, all holding default parameters
    pub fn with_slot_count(count: usize) -> Self {
        let slots = (0..count)
            .map(|i| AvoidanceConfig::new(format!("slot{i}"), ObstacleAvoidanceParams::default()))
            .collect();
        Self { slots }
    }

    /// Number of slots in this set
    pub fn max_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&AvoidanceConfig> {
        self.slots.get(slot)
    }

    /// Replaces the configuration stored in `slot`
    pub fn set(&mut self, slot: usize, config: AvoidanceConfig) -> Option<AvoidanceConfig> {
        self.slots
            .get_mut(slot)
            .map(|current| std::mem::replace(current, config))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AvoidanceConfig> {
        self.slots.iter()
    }

    /// Finds the slot holding the configuration called `name`
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|config| config.name == name)
    }

    #[cfg(feature = "serialization")]
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::Error::Serialization(e.to_string()))
    }

    #[cfg(feature = "serialization")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::Serialization(e.to_string()))
    }
}

impl Default for AvoidanceConfigSet {
    /// The four sampling quality presets followed by default parameter sets
    fn default() -> Self {
        let mut set = Self::with_slot_count(Self::MAX_COUNT);
        let presets = [
            ("low", ObstacleAvoidanceParams::low()),
            ("medium", ObstacleAvoidanceParams::medium()),
            ("good", ObstacleAvoidanceParams::good()),
            ("high", ObstacleAvoidanceParams::high()),
        ];
        for (slot, (name, params)) in presets.into_iter().enumerate() {
            set.set(slot, AvoidanceConfig::new(name, params));
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_has_presets() {
        let set = AvoidanceConfigSet::default();
        assert_eq!(set.max_count(), AvoidanceConfigSet::MAX_COUNT);
        assert_eq!(set.slot_of("low"), Some(0));
        assert_eq!(set.slot_of("high"), Some(3));
        assert_eq!(set.get(2).unwrap().params.adaptive_depth, 3);
        assert_eq!(set.get(4).unwrap().params, ObstacleAvoidanceParams::default());
        assert!(set.get(AvoidanceConfigSet::MAX_COUNT).is_none());
    }

    #[test]
    fn test_set_outside_capacity_is_rejected() {
        let mut set = AvoidanceConfigSet::with_slot_count(2);
        let replaced = set.set(5, AvoidanceConfig::new("far", ObstacleAvoidanceParams::high()));
        assert!(replaced.is_none());
        assert_eq!(set.max_count(), 2);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_json_keeps_slot_order() -> crate::Result<()> {
        let set = AvoidanceConfigSet::default();
        let restored = AvoidanceConfigSet::from_json(&set.to_json()?)?;
        assert_eq!(restored, set);
        Ok(())
    }
}
