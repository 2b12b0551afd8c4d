use crate::Vec3;

use crate::avoidance::ObstacleAvoidanceParams;
use crate::crowd::{CrowdFactory, CrowdSimulator, DT_CROWD_MAX_OBSTAVOIDANCE_PARAMS};
use crate::nav_mesh::MeshRef;
use crate::query_filter::QueryFilter;
use crate::status::Status;

/// Crowd with a fixed agent capacity and avoidance parameter table
#[derive(Debug)]
pub struct FixedCrowd {
    mesh: MeshRef,
    max_agents: usize,
    max_agent_radius: f32,
    avoidance: Vec<ObstacleAvoidanceParams>,
    query_extents: Vec3,
    filter: QueryFilter,
    disposed: bool,
}

impl FixedCrowd {
    pub fn new(
        mesh: &MeshRef,
        max_agents: usize,
        max_agent_radius: f32,
        avoidance_slots: usize,
    ) -> Result<Self, Status> {
        if mesh.is_disposed() {
            return Err(Status::NavMeshDisposed);
        }
        if max_agents == 0 || !(max_agent_radius > 0.0) {
            return Err(Status::InvalidParam);
        }

        Ok(Self {
            mesh: MeshRef::clone(mesh),
            max_agents,
            max_agent_radius,
            avoidance: vec![ObstacleAvoidanceParams::default(); avoidance_slots],
            query_extents: Vec3::new(
                max_agent_radius * 2.0,
                max_agent_radius * 1.5,
                max_agent_radius * 2.0,
            ),
            filter: QueryFilter::default(),
            disposed: false,
        })
    }
}

impl CrowdSimulator for FixedCrowd {
    fn nav_mesh(&self) -> &MeshRef {
        &self.mesh
    }

    fn max_agents(&self) -> usize {
        self.max_agents
    }

    fn max_agent_radius(&self) -> f32 {
        self.max_agent_radius
    }

    fn max_avoidance_params(&self) -> usize {
        self.avoidance.len()
    }

    fn query_extents(&self) -> Vec3 {
        self.query_extents
    }

    fn set_query_extents(&mut self, extents: Vec3) {
        self.query_extents = extents;
    }

    fn query_filter(&self) -> &QueryFilter {
        &self.filter
    }

    fn query_filter_mut(&mut self) -> &mut QueryFilter {
        &mut self.filter
    }

    fn set_avoidance_config(
        &mut self,
        slot: usize,
        params: &ObstacleAvoidanceParams,
    ) -> Result<(), Status> {
        let entry = self.avoidance.get_mut(slot).ok_or(Status::SlotOutOfRange)?;
        *entry = *params;
        Ok(())
    }

    fn avoidance_config(&self, slot: usize) -> Option<&ObstacleAvoidanceParams> {
        self.avoidance.get(slot)
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.avoidance = Vec::new();
            self.disposed = true;
        }
    }
}

/// Creates [`FixedCrowd`] simulators
#[derive(Debug)]
pub struct FixedCrowdFactory {
    avoidance_slots: usize,
    created: usize,
}

impl Default for FixedCrowdFactory {
    fn default() -> Self {
        Self {
            avoidance_slots: DT_CROWD_MAX_OBSTAVOIDANCE_PARAMS,
            created: 0,
        }
    }
}

impl FixedCrowdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of avoidance slots in the simulators this factory creates
    pub fn with_avoidance_slots(mut self, avoidance_slots: usize) -> Self {
        self.avoidance_slots = avoidance_slots;
        self
    }

    pub fn created(&self) -> usize {
        self.created
    }
}

impl CrowdFactory for FixedCrowdFactory {
    fn create(
        &mut self,
        max_agents: usize,
        max_agent_radius: f32,
        mesh: &MeshRef,
    ) -> Result<Box<dyn CrowdSimulator>, Status> {
        let crowd = FixedCrowd::new(mesh, max_agents, max_agent_radius, self.avoidance_slots)?;
        self.created += 1;
        Ok(Box::new(crowd))
    }
}
