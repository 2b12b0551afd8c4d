//! Recording backends for lifecycle tests
//!
//! Every fake reports construction and disposal into a shared [`Journal`] so
//! tests can check what was released and in which order, even after the
//! context has dropped its references.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::Vec3;

use crate::avoidance::ObstacleAvoidanceParams;
use crate::crowd::{CrowdFactory, CrowdSimulator};
use crate::nav_mesh::{MeshRef, MeshSource, NavMeshHandle};
use crate::query::{QueryBuilder, QueryEngine};
use crate::query_filter::QueryFilter;
use crate::status::Status;
use crate::{AvoidanceConfigSet, NavigationConfig, NavigationContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    MeshAcquired(usize),
    MeshDisposed(usize),
    QueryBuilt(usize),
    QueryDisposed(usize),
    CrowdCreated(usize),
    CrowdDisposed(usize),
    AvoidanceSet { crowd: usize, slot: usize },
}

impl Event {
    pub fn is_disposal(&self) -> bool {
        matches!(
            self,
            Event::MeshDisposed(_) | Event::QueryDisposed(_) | Event::CrowdDisposed(_)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Rc<RefCell<Vec<Event>>>,
    ids: Rc<Cell<usize>>,
}

impl Journal {
    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn next_id(&self) -> usize {
        let id = self.ids.get() + 1;
        self.ids.set(id);
        id
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn disposals(&self) -> Vec<Event> {
        self.events().into_iter().filter(Event::is_disposal).collect()
    }

    pub fn avoidance_slots(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::AvoidanceSet { slot, .. } => Some(slot),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct FakeMesh {
    pub id: usize,
    journal: Journal,
    disposed: Cell<bool>,
}

impl NavMeshHandle for FakeMesh {
    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn dispose(&self) {
        if !self.disposed.replace(true) {
            self.journal.push(Event::MeshDisposed(self.id));
        }
    }
}

pub struct FakeMeshSource {
    journal: Journal,
    available: Rc<Cell<bool>>,
}

impl MeshSource for FakeMeshSource {
    fn has_nav_mesh(&self) -> bool {
        self.available.get()
    }

    fn nav_mesh(&mut self) -> Option<MeshRef> {
        if !self.available.get() {
            return None;
        }
        let id = self.journal.next_id();
        self.journal.push(Event::MeshAcquired(id));
        let mesh: MeshRef = Rc::new(FakeMesh {
            id,
            journal: self.journal.clone(),
            disposed: Cell::new(false),
        });
        Some(mesh)
    }
}

#[derive(Debug)]
pub struct FakeQuery {
    pub id: usize,
    mesh: MeshRef,
    max_nodes: usize,
    journal: Journal,
    disposed: bool,
}

impl QueryEngine for FakeQuery {
    fn nav_mesh(&self) -> &MeshRef {
        &self.mesh
    }

    fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.journal.push(Event::QueryDisposed(self.id));
        }
    }
}

pub struct FakeQueryBuilder {
    journal: Journal,
    failure: Rc<Cell<Option<Status>>>,
}

impl QueryBuilder for FakeQueryBuilder {
    fn build(&mut self, mesh: &MeshRef, max_nodes: usize) -> Result<Box<dyn QueryEngine>, Status> {
        if let Some(status) = self.failure.get() {
            return Err(status);
        }
        let id = self.journal.next_id();
        self.journal.push(Event::QueryBuilt(id));
        Ok(Box::new(FakeQuery {
            id,
            mesh: Rc::clone(mesh),
            max_nodes,
            journal: self.journal.clone(),
            disposed: false,
        }))
    }
}

#[derive(Debug)]
pub struct FakeCrowd {
    pub id: usize,
    mesh: MeshRef,
    max_agents: usize,
    max_agent_radius: f32,
    avoidance: Vec<ObstacleAvoidanceParams>,
    extents: Vec3,
    filter: QueryFilter,
    journal: Journal,
    disposed: bool,
}

impl CrowdSimulator for FakeCrowd {
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
        self.extents
    }

    fn set_query_extents(&mut self, extents: Vec3) {
        self.extents = extents;
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
        self.journal.push(Event::AvoidanceSet {
            crowd: self.id,
            slot,
        });
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
            self.disposed = true;
            self.journal.push(Event::CrowdDisposed(self.id));
        }
    }
}

pub struct FakeCrowdFactory {
    journal: Journal,
    avoidance_slots: usize,
    failure: Rc<Cell<Option<Status>>>,
}

/// Extents every fake crowd starts with
pub const FAKE_CROWD_EXTENTS: Vec3 = Vec3::new(4.0, 2.0, 4.0);

impl CrowdFactory for FakeCrowdFactory {
    fn create(
        &mut self,
        max_agents: usize,
        max_agent_radius: f32,
        mesh: &MeshRef,
    ) -> Result<Box<dyn CrowdSimulator>, Status> {
        if let Some(status) = self.failure.get() {
            return Err(status);
        }
        let id = self.journal.next_id();
        self.journal.push(Event::CrowdCreated(id));
        Ok(Box::new(FakeCrowd {
            id,
            mesh: Rc::clone(mesh),
            max_agents,
            max_agent_radius,
            avoidance: vec![ObstacleAvoidanceParams::default(); self.avoidance_slots],
            extents: FAKE_CROWD_EXTENTS,
            filter: QueryFilter::default(),
            journal: self.journal.clone(),
            disposed: false,
        }))
    }
}

/// A context wired to recording backends, plus the switches controlling them
pub struct Harness {
    pub context: NavigationContext,
    pub journal: Journal,
    pub mesh_available: Rc<Cell<bool>>,
    pub query_failure: Rc<Cell<Option<Status>>>,
    pub crowd_failure: Rc<Cell<Option<Status>>>,
}

impl Harness {
    /// Mesh available, avoidance set with `configured_slots` slots, crowd
    /// simulators with `crowd_slots` avoidance slots
    pub fn with_slots(config: NavigationConfig, configured_slots: usize, crowd_slots: usize) -> Self {
        let journal = Journal::default();
        let mesh_available = Rc::new(Cell::new(true));
        let query_failure = Rc::new(Cell::new(None));
        let crowd_failure = Rc::new(Cell::new(None));

        let context = NavigationContext::new(
            config,
            FakeQueryBuilder {
                journal: journal.clone(),
                failure: Rc::clone(&query_failure),
            },
            FakeCrowdFactory {
                journal: journal.clone(),
                avoidance_slots: crowd_slots,
                failure: Rc::clone(&crowd_failure),
            },
        )
        .with_mesh_source(FakeMeshSource {
            journal: journal.clone(),
            available: Rc::clone(&mesh_available),
        })
        .with_avoidance_configs(AvoidanceConfigSet::with_slot_count(configured_slots));

        Self {
            context,
            journal,
            mesh_available,
            query_failure,
            crowd_failure,
        }
    }

    pub fn new(config: NavigationConfig) -> Self {
        Self::with_slots(
            config,
            AvoidanceConfigSet::MAX_COUNT,
            crate::DT_CROWD_MAX_OBSTAVOIDANCE_PARAMS,
        )
    }

    /// Same as [`Harness::new`] without crowd simulation
    pub fn without_crowd() -> Self {
        Self::new(NavigationConfig::new(false))
    }
}
