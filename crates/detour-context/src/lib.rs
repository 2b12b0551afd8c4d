//! Shared navigation resources for a runtime
//!
//! This crate owns the navigation mesh handle, the query engine bound to it,
//! an optional crowd simulator and the default query parameters, so that
//! agents, path requests and tools can share one initialized set instead of
//! each building their own.
//!
//! # Example
//!
//! ```rust
//! use detour_context::memory::{NavMeshParams, StaticMeshSource};
//! use detour_context::{AvoidanceConfigSet, NavigationConfig, NavigationContext};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = StaticMeshSource::new(NavMeshParams::default())?;
//! let mut context = NavigationContext::with_reference_backend(NavigationConfig::default())
//!     .with_mesh_source(source)
//!     .with_avoidance_configs(AvoidanceConfigSet::default());
//!
//! context.open()?;
//! assert!(context.is_active());
//!
//! let query = context.shared_query().cloned().unwrap();
//! assert_eq!(query.max_nodes(), 2048);
//!
//! context.close();
//! assert!(query.is_disposed());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`NavigationContext`]: builds, exposes and releases the resource set
//! - [`MeshSource`], [`QueryBuilder`], [`CrowdFactory`]: backend seams
//! - [`DefaultParameters`]: default extents and filter with ownership tags
//! - [`memory`]: in-memory reference backend

pub mod avoidance;
pub mod config;
pub mod context;
pub mod crowd;
pub mod defaults;
pub mod memory;
pub mod nav_mesh;
pub mod query;
pub mod query_filter;
pub mod status;

pub use avoidance::{AvoidanceConfig, AvoidanceConfigSet, ObstacleAvoidanceParams};
pub use config::NavigationConfig;
pub use context::{LifecycleStats, NavigationContext};
pub use crowd::{CrowdFactory, CrowdRef, CrowdSimulator, DT_CROWD_MAX_OBSTAVOIDANCE_PARAMS};
pub use defaults::{DefaultExtents, DefaultFilter, DefaultParameters};
pub use nav_mesh::{MeshRef, MeshSource, NavMeshHandle};
pub use query::{QueryBuilder, QueryEngine, QueryRef, SharedQuery};
pub use query_filter::{PolyFlags, QueryFilter};
pub use status::Status;

/// Represents a 3D position or extent
pub type Vec3 = glam::Vec3;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("mesh source has no navigation mesh")]
    MissingNavMesh,

    #[error("navigation query build failed: {0}")]
    QueryBuild(Status),

    #[error("crowd simulation is enabled but no avoidance configuration set is attached")]
    MissingAvoidanceConfig,

    #[error("crowd simulator creation failed: {0}")]
    CrowdBuild(Status),

    #[error("invalid navigation config: {0}")]
    InvalidConfig(String),

    #[error("navigation context is not initialized")]
    NotInitialized,

    #[cfg(feature = "serialization")]
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for navigation context operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test_helpers;


#[cfg(test)]
mod reference_backend_tests;
