//! In-memory reference backend
//!
//! Self-contained implementations of the mesh source, query builder and
//! crowd factory. They hold no geometry beyond the mesh layout but honour
//! the same construction failures and disposal rules as a real backend, which
//! makes them suitable for tools and integration tests.

mod crowd;
mod mesh;
pub mod node_pool;
mod query;

pub use crowd::{FixedCrowd, FixedCrowdFactory};
pub use mesh::{BakedNavMesh, NavMeshParams, StaticMeshSource};
pub use node_pool::NodePool;
pub use query::{NodePoolQuery, NodePoolQueryBuilder};

use crate::{NavigationConfig, NavigationContext};

impl NavigationContext {
    /// Creates a context backed by [`NodePoolQueryBuilder`] and
    /// [`FixedCrowdFactory`]
    pub fn with_reference_backend(config: NavigationConfig) -> Self {
        Self::new(config, NodePoolQueryBuilder::new(), FixedCrowdFactory::new())
    }
}
