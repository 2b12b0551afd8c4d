//! Polygon filtering and traversal costs for navigation queries

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Maximum number of area types a filter assigns a cost to
pub const DT_MAX_AREAS: usize = 64;

bitflags::bitflags! {
    /// Polygon ability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
    pub struct PolyFlags: u16 {
        /// Ground that can be walked on
        const WALK = 0x01;
        /// Water that can be swum through
        const SWIM = 0x02;
        /// Door that can be passed through
        const DOOR = 0x04;
        /// Gap that has to be jumped
        const JUMP = 0x08;
        /// Polygon is temporarily unusable
        const DISABLED = 0x10;
        /// All abilities
        const ALL = 0xffff;
    }
}

/// Restricts which polygons a query may visit and how much they cost
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QueryFilter {
    /// Flags a polygon needs at least one of to be visited
    pub include_flags: PolyFlags,
    /// Flags that exclude a polygon
    pub exclude_flags: PolyFlags,
    /// Cost multiplier per area type
    #[cfg_attr(feature = "serialization", serde(with = "area_cost_serde"))]
    pub area_cost: [f32; DT_MAX_AREAS],
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            include_flags: PolyFlags::ALL,
            exclude_flags: PolyFlags::empty(),
            area_cost: [1.0; DT_MAX_AREAS],
        }
    }
}

impl QueryFilter {
    /// Creates a filter that accepts `include` and rejects `exclude`
    pub fn new(include: PolyFlags, exclude: PolyFlags) -> Self {
        Self {
            include_flags: include,
            exclude_flags: exclude,
            ..Default::default()
        }
    }

    /// Returns true if a polygon with the given flags may be visited
    pub fn pass_filter(&self, flags: PolyFlags) -> bool {
        flags.intersects(self.include_flags) && !flags.intersects(self.exclude_flags)
    }

    /// Cost of moving `distance` through a polygon of the given area
    pub fn cost(&self, area: u8, distance: f32) -> f32 {
        self.area_cost
            .get(area as usize)
            .map_or(f32::INFINITY, |cost| distance * cost)
    }

    /// Sets the traversal cost of an area type. Out-of-range areas are ignored.
    pub fn set_area_cost(&mut self, area: u8, cost: f32) {
        if let Some(slot) = self.area_cost.get_mut(area as usize) {
            *slot = cost;
        }
    }
}

// serde only derives arrays up to 32 elements
#[cfg(feature = "serialization")]
mod area_cost_serde {
    use super::DT_MAX_AREAS;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(costs: &[f32; DT_MAX_AREAS], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(costs.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[f32; DT_MAX_AREAS], D::Error> {
        let costs = Vec::<f32>::deserialize(d)?;
        let len = costs.len();
        costs
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"64 area costs"))
    }
}
