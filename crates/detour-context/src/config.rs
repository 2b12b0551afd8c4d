use crate::Vec3;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Default size of the query engine's search node pool
pub const DEFAULT_MAX_QUERY_NODES: usize = 2048;
/// Default capacity of the crowd agent table
pub const DEFAULT_MAX_CROWD_AGENTS: usize = 10;
/// Default maximum agent radius
pub const DEFAULT_MAX_AGENT_RADIUS: f32 = 0.5;

/// Static configuration of a navigation context
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct NavigationConfig {
    pub max_query_nodes: usize,
    pub crowd_enabled: bool,
    pub max_crowd_agents: usize,
    pub max_agent_radius: f32,
    /// Search half extents used when no crowd simulator provides its own
    pub initial_extents: Vec3,
}

impl NavigationConfig {
    pub fn new(crowd_enabled: bool) -> Self {
        NavigationConfig {
            max_query_nodes: DEFAULT_MAX_QUERY_NODES,
            crowd_enabled,
            max_crowd_agents: DEFAULT_MAX_CROWD_AGENTS,
            max_agent_radius: DEFAULT_MAX_AGENT_RADIUS,
            initial_extents: Vec3::ONE,
        }
    }

    pub fn with_max_query_nodes(mut self, max_query_nodes: usize) -> Self {
        self.max_query_nodes = max_query_nodes;
        self
    }

    pub fn with_crowd(mut self, crowd_enabled: bool) -> Self {
        self.crowd_enabled = crowd_enabled;
        self
    }

    pub fn with_max_crowd_agents(mut self, max_crowd_agents: usize) -> Self {
        self.max_crowd_agents = max_crowd_agents;
        self
    }

    pub fn with_max_agent_radius(mut self, max_agent_radius: f32) -> Self {
        self.max_agent_radius = max_agent_radius;
        self
    }

    pub fn with_initial_extents(mut self, initial_extents: Vec3) -> Self {
        self.initial_extents = initial_extents;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_query_nodes == 0 {
            return Err("Max query nodes must be positive".to_string());
        }
        if !self.initial_extents.is_finite() || self.initial_extents.min_element() < 0.0 {
            return Err("Initial extents must be finite and non-negative".to_string());
        }
        if self.crowd_enabled {
            if self.max_crowd_agents == 0 {
                return Err("Max crowd agents must be positive".to_string());
            }
            if !(self.max_agent_radius.is_finite() && self.max_agent_radius > 0.0) {
                return Err("Max agent radius must be positive".to_string());
            }
        }
        Ok(())
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

impl Default for NavigationConfig {
    fn default() -> Self {
        Self::new(true)
    }
}
