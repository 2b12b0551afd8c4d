//! Shared navigation resources and their lifecycle
//!
//! A [`NavigationContext`] owns one navigation mesh handle, the query engine
//! built on it, an optional crowd simulator and the default query
//! parameters. Consumers share these through the context instead of creating
//! their own.
//!
//! Resources are built in dependency order (mesh, query, crowd, defaults) and
//! released in reverse. The context is either fully initialized or holds
//! nothing: a failed [`initialize`](NavigationContext::initialize) releases
//! whatever it built before returning.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Vec3;

use crate::avoidance::AvoidanceConfigSet;
use crate::config::NavigationConfig;
use crate::crowd::{CrowdFactory, CrowdRef, CrowdSimulator};
use crate::defaults::DefaultParameters;
use crate::nav_mesh::{MeshRef, MeshSource};
use crate::query::{QueryBuilder, QueryRef, SharedQuery};
use crate::query_filter::QueryFilter;
use crate::{Error, Result};

/// Counters describing a context's lifecycle so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleStats {
    /// Successful initializations
    pub initializations: u64,
    /// Failed initializations
    pub failures: u64,
    /// Resets that released an active resource set
    pub resets: u64,
}

/// A complete resource set. Only ever stored whole.
#[derive(Debug)]
struct ActiveSet {
    mesh: MeshRef,
    query: QueryRef,
    shared_query: SharedQuery,
    crowd: Option<CrowdRef>,
    defaults: DefaultParameters,
}

impl ActiveSet {
    fn is_live(&self, host_enabled: bool) -> bool {
        // a resource a consumer is mutating cannot have been disposed
        let query_disposed = self
            .query
            .try_borrow()
            .is_ok_and(|query| query.is_disposed());
        if self.mesh.is_disposed() || query_disposed {
            return false;
        }
        match &self.crowd {
            None => true,
            Some(crowd) => {
                let crowd_disposed = crowd
                    .try_borrow()
                    .is_ok_and(|simulator| simulator.is_disposed());
                !crowd_disposed && host_enabled
            }
        }
    }

    /// Releases dependents before the mesh they were built on
    fn release(self) {
        let ActiveSet {
            mesh,
            query,
            shared_query,
            crowd,
            defaults,
        } = self;
        // borrowed extents go first, they point into the crowd
        let DefaultParameters { extents: _, filter } = defaults;

        if let Some(crowd) = crowd {
            dispose_crowd(&crowd);
        }
        drop(filter);
        dispose_query(&query);
        drop(query);
        drop(shared_query);
        dispose_mesh(&mesh);
    }
}

// A consumer still borrowing a resource keeps it alive. The rest of the set
// is released regardless.
fn dispose_crowd(crowd: &CrowdRef) {
    let Ok(mut crowd) = crowd.try_borrow_mut() else {
        log::error!("Crowd simulator is borrowed during release, skipping its disposal");
        return;
    };
    if !crowd.is_disposed() {
        log::debug!("Disposing crowd simulator ({} agents)", crowd.max_agents());
        crowd.dispose();
    }
}

fn dispose_query(query: &QueryRef) {
    let Ok(mut query) = query.try_borrow_mut() else {
        log::error!("Navigation query is borrowed during release, skipping its disposal");
        return;
    };
    if !query.is_disposed() {
        log::debug!("Disposing navigation query ({} nodes)", query.max_nodes());
        query.dispose();
    }
}

fn dispose_mesh(mesh: &MeshRef) {
    if !mesh.is_disposed() {
        log::debug!("Disposing navigation mesh");
        mesh.dispose();
    }
}

/// Resources acquired by an initialization still in progress.
///
/// Dropping the staging area releases everything in it, so any early return
/// from [`NavigationContext::initialize`] leaves nothing behind.
#[derive(Default)]
struct Staging {
    mesh: Option<MeshRef>,
    query: Option<QueryRef>,
    crowd: Option<CrowdRef>,
}

impl Staging {
    fn commit(mut self) {
        self.mesh = None;
        self.query = None;
        self.crowd = None;
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if let Some(crowd) = self.crowd.take() {
            dispose_crowd(&crowd);
        }
        if let Some(query) = self.query.take() {
            dispose_query(&query);
        }
        if let Some(mesh) = self.mesh.take() {
            log::debug!("Releasing navigation mesh acquired by failed initialization");
            dispose_mesh(&mesh);
        }
    }
}

/// Copies the first `min(simulator slots, configured slots)` avoidance
/// entries into the simulator, lowest slot first.
fn copy_avoidance_configs(
    crowd: &mut dyn CrowdSimulator,
    configs: &AvoidanceConfigSet,
) -> Result<usize> {
    let count = crowd.max_avoidance_params().min(configs.max_count());
    for slot in 0..count {
        if let Some(config) = configs.get(slot) {
            crowd
                .set_avoidance_config(slot, &config.params)
                .map_err(Error::CrowdBuild)?;
        }
    }
    log::debug!("Copied {} avoidance configurations into the crowd", count);
    Ok(count)
}

/// Owner of the shared navigation mesh, query engine and crowd simulator
pub struct NavigationContext {
    config: NavigationConfig,
    mesh_source: Option<Box<dyn MeshSource>>,
    avoidance: Option<AvoidanceConfigSet>,
    query_builder: Box<dyn QueryBuilder>,
    crowd_factory: Box<dyn CrowdFactory>,
    /// Host enable signal
    enabled: bool,
    active: Option<ActiveSet>,
    stats: LifecycleStats,
}

impl NavigationContext {
    /// Creates an uninitialized context using the given backends
    pub fn new(
        config: NavigationConfig,
        query_builder: impl QueryBuilder + 'static,
        crowd_factory: impl CrowdFactory + 'static,
    ) -> Self {
        Self {
            config,
            mesh_source: None,
            avoidance: None,
            query_builder: Box::new(query_builder),
            crowd_factory: Box::new(crowd_factory),
            enabled: true,
            active: None,
            stats: LifecycleStats::default(),
        }
    }

    pub fn with_mesh_source(mut self, source: impl MeshSource + 'static) -> Self {
        self.set_mesh_source(source);
        self
    }

    pub fn with_avoidance_configs(mut self, configs: AvoidanceConfigSet) -> Self {
        self.avoidance = Some(configs);
        self
    }

    /// Builds the full resource set, replacing any existing one.
    ///
    /// On failure the context holds no resources and the error is also
    /// logged. Calling this again after fixing the cause is safe.
    pub fn initialize(&mut self) -> Result<()> {
        match self.build() {
            Ok(()) => {
                self.stats.initializations += 1;
                log::info!(
                    "Navigation context initialized (query nodes: {}, crowd: {})",
                    self.config.max_query_nodes,
                    self.active.as_ref().is_some_and(|set| set.crowd.is_some())
                );
                Ok(())
            }
            Err(e) => {
                self.stats.failures += 1;
                log::error!("Navigation context initialization failed: {}", e);
                Err(e)
            }
        }
    }

    fn build(&mut self) -> Result<()> {
        self.config.validate().map_err(Error::InvalidConfig)?;

        let has_mesh = self
            .mesh_source
            .as_ref()
            .is_some_and(|source| source.has_nav_mesh());
        if !has_mesh {
            return Err(Error::MissingNavMesh);
        }

        self.reset();
        if let Some(stale) = self.active.take() {
            log::warn!("Releasing inactive navigation resources before rebuilding");
            stale.release();
        }

        let mut staging = Staging::default();

        let mesh = self
            .mesh_source
            .as_mut()
            .and_then(|source| source.nav_mesh())
            .ok_or(Error::MissingNavMesh)?;
        staging.mesh = Some(Rc::clone(&mesh));
        log::debug!("Acquired navigation mesh");

        let engine = self
            .query_builder
            .build(&mesh, self.config.max_query_nodes)
            .map_err(Error::QueryBuild)?;
        let query: QueryRef = Rc::new(RefCell::new(engine));
        staging.query = Some(Rc::clone(&query));
        log::debug!("Built navigation query ({} nodes)", self.config.max_query_nodes);

        let avoidance = if self.config.crowd_enabled {
            match self.avoidance.as_ref() {
                Some(avoidance) => Some(avoidance),
                None => return Err(Error::MissingAvoidanceConfig),
            }
        } else {
            None
        };

        let shared_query = SharedQuery::new(Rc::clone(&query));

        let (crowd, defaults) = match avoidance {
            Some(avoidance) => {
                let simulator = self
                    .crowd_factory
                    .create(
                        self.config.max_crowd_agents,
                        self.config.max_agent_radius,
                        &mesh,
                    )
                    .map_err(Error::CrowdBuild)?;
                let crowd: CrowdRef = Rc::new(RefCell::new(simulator));
                staging.crowd = Some(Rc::clone(&crowd));
                log::debug!(
                    "Created crowd simulator ({} agents, radius {})",
                    self.config.max_crowd_agents,
                    self.config.max_agent_radius
                );

                {
                    let mut simulator = crowd.borrow_mut();
                    copy_avoidance_configs(&mut **simulator, avoidance)?;
                }
                (Some(crowd), DefaultParameters::borrowed())
            }
            None => (None, DefaultParameters::owned(self.config.initial_extents)),
        };

        staging.commit();
        self.active = Some(ActiveSet {
            mesh,
            query,
            shared_query,
            crowd,
            defaults,
        });
        Ok(())
    }

    /// Releases the resource set if the context is active.
    ///
    /// Returns false without touching anything when the context is inactive.
    pub fn reset(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if let Some(set) = self.active.take() {
            set.release();
            self.stats.resets += 1;
            log::info!("Navigation context reset");
        }
        true
    }

    /// Initializes the context unless it is already active
    pub fn open(&mut self) -> Result<()> {
        if self.is_active() {
            log::debug!("Navigation context already active");
            return Ok(());
        }
        self.initialize()
    }

    /// Releases every held resource, whether or not the context is active
    pub fn close(&mut self) {
        if let Some(set) = self.active.take() {
            set.release();
            self.stats.resets += 1;
            log::info!("Navigation context closed");
        }
    }

    /// True when the mesh and query are live and, if there is a crowd, the
    /// crowd is live and the host is enabled. Evaluated on every call.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|set| set.is_live(self.enabled))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Updates the host enable signal
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn nav_mesh(&self) -> Option<&MeshRef> {
        self.active.as_ref().map(|set| &set.mesh)
    }

    pub fn query(&self) -> Option<&QueryRef> {
        self.active.as_ref().map(|set| &set.query)
    }

    pub fn shared_query(&self) -> Option<&SharedQuery> {
        self.active.as_ref().map(|set| &set.shared_query)
    }

    pub fn crowd(&self) -> Option<&CrowdRef> {
        self.active.as_ref().and_then(|set| set.crowd.as_ref())
    }

    pub fn default_parameters(&self) -> Option<&DefaultParameters> {
        self.active.as_ref().map(|set| &set.defaults)
    }

    /// Current default search extents
    pub fn default_extents(&self) -> Option<Vec3> {
        let set = self.active.as_ref()?;
        set.defaults.extents(set.crowd.as_ref())
    }

    /// Writes the default extents, through to the crowd simulator when it
    /// provides them
    pub fn set_default_extents(&mut self, extents: Vec3) -> Result<()> {
        let set = self.active.as_mut().ok_or(Error::NotInitialized)?;
        set.defaults.set_extents(extents, set.crowd.as_ref());
        Ok(())
    }

    /// Current default query filter
    pub fn default_filter(&self) -> Option<QueryFilter> {
        let set = self.active.as_ref()?;
        set.defaults.filter(set.crowd.as_ref())
    }

    /// Replaces the default filter with one owned by the context
    pub fn set_default_filter(&mut self, filter: QueryFilter) -> Result<()> {
        let set = self.active.as_mut().ok_or(Error::NotInitialized)?;
        set.defaults.set_filter(filter);
        Ok(())
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Configuration used by the next initialization
    pub fn config_mut(&mut self) -> &mut NavigationConfig {
        &mut self.config
    }

    pub fn set_mesh_source(&mut self, source: impl MeshSource + 'static) {
        self.mesh_source = Some(Box::new(source));
    }

    pub fn clear_mesh_source(&mut self) {
        self.mesh_source = None;
    }

    pub fn avoidance_configs(&self) -> Option<&AvoidanceConfigSet> {
        self.avoidance.as_ref()
    }

    pub fn set_avoidance_configs(&mut self, configs: Option<AvoidanceConfigSet>) {
        self.avoidance = configs;
    }

    pub fn stats(&self) -> LifecycleStats {
        self.stats
    }
}

impl Drop for NavigationContext {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationContext")
            .field("config", &self.config)
            .field("has_mesh_source", &self.mesh_source.is_some())
            .field("has_avoidance", &self.avoidance.is_some())
            .field("enabled", &self.enabled)
            .field("active", &self.is_active())
            .field("stats", &self.stats)
            .finish()
    }
}
