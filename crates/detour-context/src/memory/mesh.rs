use std::cell::Cell;
use std::rc::Rc;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::nav_mesh::{MeshRef, MeshSource, NavMeshHandle};
use crate::status::Status;

/// Layout of a baked tiled navigation mesh
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct NavMeshParams {
    /// World-space origin of the tile grid
    pub origin: [f32; 3],
    pub tile_width: f32,
    pub tile_height: f32,
    pub max_tiles: i32,
    pub max_polys_per_tile: i32,
}

impl Default for NavMeshParams {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            tile_width: 100.0,
            tile_height: 100.0,
            max_tiles: 1,
            max_polys_per_tile: 1024,
        }
    }
}

impl NavMeshParams {
    pub fn validate(&self) -> Result<(), Status> {
        if self.origin.iter().any(|v| !v.is_finite()) {
            return Err(Status::InvalidParam);
        }
        if self.tile_width <= 0.0 || self.tile_height <= 0.0 {
            return Err(Status::InvalidParam);
        }
        // a mesh with no tile or polygon capacity can never hold data
        if self.max_tiles <= 0 || self.max_polys_per_tile <= 0 {
            return Err(Status::NavMeshInvalid);
        }
        Ok(())
    }
}

/// Handle to baked mesh data held in memory
#[derive(Debug)]
pub struct BakedNavMesh {
    params: Rc<NavMeshParams>,
    disposed: Cell<bool>,
}

impl BakedNavMesh {
    pub fn new(params: Rc<NavMeshParams>) -> Self {
        Self {
            params,
            disposed: Cell::new(false),
        }
    }

    /// Mesh layout, or `None` once released
    pub fn params(&self) -> Option<&NavMeshParams> {
        (!self.disposed.get()).then_some(self.params.as_ref())
    }
}

impl NavMeshHandle for BakedNavMesh {
    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn dispose(&self) {
        self.disposed.set(true);
    }
}

/// Mesh source serving handles to one baked mesh
#[derive(Debug, Default)]
pub struct StaticMeshSource {
    baked: Option<Rc<NavMeshParams>>,
    handles_issued: usize,
}

impl StaticMeshSource {
    /// Source for an already baked mesh. Invalid layouts are rejected.
    pub fn new(params: NavMeshParams) -> Result<Self, Status> {
        params.validate()?;
        Ok(Self {
            baked: Some(Rc::new(params)),
            handles_issued: 0,
        })
    }

    /// Source that has nothing baked yet
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_baked(&mut self, params: NavMeshParams) -> Result<(), Status> {
        params.validate()?;
        self.baked = Some(Rc::new(params));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.baked = None;
    }

    pub fn handles_issued(&self) -> usize {
        self.handles_issued
    }
}

impl MeshSource for StaticMeshSource {
    fn has_nav_mesh(&self) -> bool {
        self.baked.is_some()
    }

    fn nav_mesh(&mut self) -> Option<MeshRef> {
        let params = Rc::clone(self.baked.as_ref()?);
        self.handles_issued += 1;
        let mesh: MeshRef = Rc::new(BakedNavMesh::new(params));
        Some(mesh)
    }
}
