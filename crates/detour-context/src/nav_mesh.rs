//! Navigation mesh handles and the sources that provide them

use std::fmt;
use std::rc::Rc;

/// A baked navigation mesh owned by a [`NavigationContext`](crate::NavigationContext)
///
/// Handles are shared (`Rc`) with the query engine and crowd simulator built
/// on top of them, so releasing one is an explicit call rather than a drop.
/// Implementations track their released state with interior mutability.
pub trait NavMeshHandle: fmt::Debug {
    /// Returns true once [`dispose`](Self::dispose) has been called
    fn is_disposed(&self) -> bool;

    /// Releases the mesh data. Anything still bound to this handle must not
    /// be used afterwards. Calling this twice has no further effect.
    fn dispose(&self);
}

/// Shared reference to a navigation mesh handle
pub type MeshRef = Rc<dyn NavMeshHandle>;

/// Supplies baked navigation meshes
pub trait MeshSource {
    /// Whether a baked mesh is available
    fn has_nav_mesh(&self) -> bool;

    /// Produces a new handle to the baked mesh.
    ///
    /// Returns `None` when no mesh is available. Each call hands out a fresh
    /// handle whose lifetime is managed by the caller.
    fn nav_mesh(&mut self) -> Option<MeshRef>;
}
