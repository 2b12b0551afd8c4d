//! Crowd simulators sharing a navigation mesh

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::Vec3;

use crate::avoidance::ObstacleAvoidanceParams;
use crate::nav_mesh::MeshRef;
use crate::query_filter::QueryFilter;
use crate::status::Status;

/// The maximum number of crowd avoidance configurations supported by the
/// crowd manager.
pub const DT_CROWD_MAX_OBSTAVOIDANCE_PARAMS: usize = 8;

/// Multi-agent simulator with a fixed agent table and avoidance table
pub trait CrowdSimulator: fmt::Debug {
    fn nav_mesh(&self) -> &MeshRef;

    /// Capacity of the agent table
    fn max_agents(&self) -> usize;

    /// Largest agent radius the simulator supports
    fn max_agent_radius(&self) -> f32;

    /// Number of avoidance parameter slots
    fn max_avoidance_params(&self) -> usize;

    /// Half extents used when placing agents on the mesh
    fn query_extents(&self) -> Vec3;

    fn set_query_extents(&mut self, extents: Vec3);

    /// Filter used for agent queries
    fn query_filter(&self) -> &QueryFilter;

    fn query_filter_mut(&mut self) -> &mut QueryFilter;

    /// Copies `params` into avoidance slot `slot`
    fn set_avoidance_config(
        &mut self,
        slot: usize,
        params: &ObstacleAvoidanceParams,
    ) -> Result<(), Status>;

    /// Avoidance parameters stored in `slot`
    fn avoidance_config(&self, slot: usize) -> Option<&ObstacleAvoidanceParams>;

    fn is_disposed(&self) -> bool;

    /// Releases the agent table. Calling this twice has no further effect.
    fn dispose(&mut self);
}

/// Creates crowd simulators
pub trait CrowdFactory {
    fn create(
        &mut self,
        max_agents: usize,
        max_agent_radius: f32,
        mesh: &MeshRef,
    ) -> Result<Box<dyn CrowdSimulator>, Status>;
}

/// Reference-counted crowd simulator owned by a navigation context
pub type CrowdRef = Rc<RefCell<Box<dyn CrowdSimulator>>>;
