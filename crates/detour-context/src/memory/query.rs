use super::node_pool::{NodePool, MAX_POOL_NODES};
use crate::nav_mesh::MeshRef;
use crate::query::{QueryBuilder, QueryEngine};
use crate::status::Status;

/// Query engine whose working set is a [`NodePool`]
#[derive(Debug)]
pub struct NodePoolQuery {
    mesh: MeshRef,
    pool: NodePool,
    max_nodes: usize,
    disposed: bool,
}

impl NodePoolQuery {
    pub fn new(mesh: &MeshRef, max_nodes: usize) -> Result<Self, Status> {
        if mesh.is_disposed() {
            return Err(Status::NavMeshDisposed);
        }
        if max_nodes == 0 || max_nodes > MAX_POOL_NODES {
            return Err(Status::InvalidParam);
        }

        Ok(Self {
            mesh: MeshRef::clone(mesh),
            pool: NodePool::new(max_nodes),
            max_nodes,
            disposed: false,
        })
    }

    pub fn node_pool(&self) -> &NodePool {
        &self.pool
    }
}

impl QueryEngine for NodePoolQuery {
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
            self.pool.release();
            self.disposed = true;
        }
    }
}

/// Builds [`NodePoolQuery`] engines
#[derive(Debug, Default)]
pub struct NodePoolQueryBuilder {
    built: usize,
}

impl NodePoolQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of engines built so far
    pub fn built(&self) -> usize {
        self.built
    }
}

impl QueryBuilder for NodePoolQueryBuilder {
    fn build(&mut self, mesh: &MeshRef, max_nodes: usize) -> Result<Box<dyn QueryEngine>, Status> {
        let query = NodePoolQuery::new(mesh, max_nodes)?;
        self.built += 1;
        Ok(Box::new(query))
    }
}
