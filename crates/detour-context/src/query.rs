//! Query engines bound to a navigation mesh

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::nav_mesh::MeshRef;
use crate::status::Status;

/// Spatial query engine answering queries against a single navigation mesh
pub trait QueryEngine: fmt::Debug {
    /// The mesh this engine was built for. Engines are never rebound.
    fn nav_mesh(&self) -> &MeshRef;

    /// Size of the search node working set
    fn max_nodes(&self) -> usize;

    fn is_disposed(&self) -> bool;

    /// Releases the working set. Calling this twice has no further effect.
    fn dispose(&mut self);
}

/// Builds query engines for a mesh
pub trait QueryBuilder {
    /// Builds an engine over `mesh` with a working set of `max_nodes` nodes
    fn build(&mut self, mesh: &MeshRef, max_nodes: usize) -> Result<Box<dyn QueryEngine>, Status>;
}

/// Reference-counted query engine owned by a navigation context
pub type QueryRef = Rc<RefCell<Box<dyn QueryEngine>>>;

/// Query wrapper handed out to consumers of a navigation context
///
/// Cloning is cheap and every clone observes the same engine. The wrapper
/// owns nothing beyond the engine reference; once the context resets, the
/// engine reports disposed and the wrapper must be dropped.
#[derive(Debug, Clone)]
pub struct SharedQuery {
    engine: QueryRef,
}

impl SharedQuery {
    pub fn new(engine: QueryRef) -> Self {
        Self { engine }
    }

    /// Returns true once the wrapped engine has been released
    pub fn is_disposed(&self) -> bool {
        self.engine.borrow().is_disposed()
    }

    pub fn max_nodes(&self) -> usize {
        self.engine.borrow().max_nodes()
    }

    /// Runs `f` against the wrapped engine
    ///
    /// # Panics
    ///
    /// Panics if the engine is already borrowed mutably through the context.
    pub fn with<R>(&self, f: impl FnOnce(&dyn QueryEngine) -> R) -> R {
        let engine = self.engine.borrow();
        f(&**engine)
    }

    /// Returns true if both wrappers point at the same engine
    pub fn ptr_eq(&self, other: &SharedQuery) -> bool {
        Rc::ptr_eq(&self.engine, &other.engine)
    }
}
