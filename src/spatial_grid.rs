/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the toroidal world into cells_per_axis x cells_per_axis cells
 * holding agent handles, so a neighbour query only visits a fixed window of
 * cells instead of every agent.
 *
 * - Cells store AgentId handles, never references into the agent arena
 * - A per-handle slot index makes removal O(1) (swap-remove plus fix-up)
 * - Window indices wrap modulo cells_per_axis; positions read across a seam
 *   are shifted by the world extent so plain Euclidean distance is correct
 */

use nannou::prelude::{vec2, Vec2};
use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::boid::Boid;
use crate::params::SimulationConfig;

new_key_type! {
    /// Stable handle for an agent in the flock arena.
    pub struct AgentId;
}

/// Column (`i`, along x) and row (`j`, along y) of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellIndex {
    pub i: usize,
    pub j: usize,
}

impl CellIndex {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

/// A neighbour seen from a window query. Position and velocity are copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: AgentId,
    /// Stored position, shifted by +-width / +-height when the window wrapped.
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cells_per_axis: usize,
    world_width: f32,
    world_height: f32,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Vec<AgentId>>,
    // Position of each registered handle inside its cell vector
    slots: SecondaryMap<AgentId, usize>,
}

impl SpatialGrid {
    pub fn new(config: &SimulationConfig) -> Self {
        let cells_per_axis = config.cells_per_axis.max(1);
        let mut cells = Vec::with_capacity(cells_per_axis * cells_per_axis);
        cells.resize_with(cells_per_axis * cells_per_axis, Vec::new);

        Self {
            cells_per_axis,
            world_width: config.world_width,
            world_height: config.world_height,
            cell_width: config.world_width / cells_per_axis as f32,
            cell_height: config.world_height / cells_per_axis as f32,
            cells,
            slots: SecondaryMap::new(),
        }
    }

    #[inline]
    pub fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        vec2(self.cell_width, self.cell_height)
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.slots.contains_key(id)
    }

    /// Handles currently bucketed in `cell`.
    pub fn cell(&self, cell: CellIndex) -> &[AgentId] {
        &self.cells[self.flat_index(cell)]
    }

    // Convert world coordinates to grid cell coordinates
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> CellIndex {
        let n = self.cells_per_axis as i64;
        let i = ((position.x / self.cell_width).floor() as i64).rem_euclid(n);
        let j = ((position.y / self.cell_height).floor() as i64).rem_euclid(n);
        CellIndex::new(i as usize, j as usize)
    }

    /// Append `id` to the cell under `boid.position` and record that cell on the boid.
    pub fn insert(&mut self, id: AgentId, boid: &mut Boid) {
        let cell = self.cell_of(boid.position);
        let flat = self.flat_index(cell);
        let bucket = &mut self.cells[flat];
        self.slots.insert(id, bucket.len());
        bucket.push(id);
        boid.cell = cell;
    }

    /// Erase `id` from the cell recorded on `boid`.
    ///
    /// # Panics
    ///
    /// Panics when `id` is not registered in that cell. Continuing would leave
    /// the grid out of step with the agents.
    pub fn remove(&mut self, id: AgentId, boid: &Boid) {
        let Some(slot) = self.slots.remove(id) else {
            panic!("agent {id:?} is not registered in the spatial grid");
        };
        let flat = self.flat_index(boid.cell);
        let bucket = &mut self.cells[flat];
        if bucket.get(slot) != Some(&id) {
            panic!(
                "agent {id:?} is not a member of its recorded cell ({}, {})",
                boid.cell.i, boid.cell.j
            );
        }
        bucket.swap_remove(slot);
        if let Some(&moved) = bucket.get(slot) {
            self.slots[moved] = slot;
        }
    }

    /// Move `id` to the cell under its current position. Returns whether it moved.
    pub fn relocate(&mut self, id: AgentId, boid: &mut Boid) -> bool {
        let cell = self.cell_of(boid.position);
        if cell == boid.cell {
            return false;
        }
        self.remove(id, boid);
        self.insert(id, boid);
        true
    }

    /// Drop every handle and re-register all of `agents` from their positions.
    pub fn rebuild(&mut self, agents: &mut SlotMap<AgentId, Boid>) {
        for bucket in &mut self.cells {
            bucket.clear();
        }
        self.slots.clear();
        for (id, boid) in agents.iter_mut() {
            self.insert(id, boid);
        }
    }

    /// Every agent in the `(2r+1)^2` block of cells around `center`, with
    /// seam-corrected positions.
    ///
    /// The radius is capped at `(cells_per_axis - 1) / 2` so a cell is never
    /// visited twice on small grids.
    pub fn neighbors_in_window<'a>(
        &'a self,
        center: CellIndex,
        radius: usize,
        agents: &'a SlotMap<AgentId, Boid>,
    ) -> impl Iterator<Item = Neighbor> + 'a {
        let radius = radius.min((self.cells_per_axis - 1) / 2) as isize;
        let ci = center.i as isize;
        let cj = center.j as isize;

        (-radius..=radius)
            .flat_map(move |di| (-radius..=radius).map(move |dj| (ci + di, cj + dj)))
            .flat_map(move |(raw_i, raw_j)| {
                let (i, shift_x) = self.wrap_index(raw_i, self.world_width);
                let (j, shift_y) = self.wrap_index(raw_j, self.world_height);
                let shift = vec2(shift_x, shift_y);
                self.cells[j * self.cells_per_axis + i]
                    .iter()
                    .filter_map(move |&id| {
                        agents.get(id).map(|other| Neighbor {
                            id,
                            position: other.position + shift,
                            velocity: other.velocity,
                        })
                    })
            })
    }

    // Wrap a raw window coordinate and report the positional shift for that axis
    #[inline]
    fn wrap_index(&self, raw: isize, extent: f32) -> (usize, f32) {
        let n = self.cells_per_axis as isize;
        let shift = if raw < 0 {
            -extent
        } else if raw >= n {
            extent
        } else {
            0.0
        };
        (raw.rem_euclid(n) as usize, shift)
    }

    #[inline]
    fn flat_index(&self, cell: CellIndex) -> usize {
        cell.j * self.cells_per_axis + cell.i
    }
}
