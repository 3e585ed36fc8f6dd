//! Spatial grid partitioning for overlap queries.
//!
//! The bumper pass asks "which collidable boxes overlap mine?" once per bumper
//! per frame.  Bucketing collidables into a uniform grid turns that into an
//! O(K) scan of nearby cells instead of a scan of every live entity.
//!
//! ## Cell Size Choice
//!
//! Cell size (`GRID_CELL_SIZE` in `constants.rs`) is kept above the largest
//! pairwise reach (sum of two half extents), so a query covers at most a 3×3
//! block of cells.

use crate::bumper::Collidable;
use crate::constants::GRID_CELL_SIZE;
use bevy::prelude::*;
use std::collections::HashMap;

/// Resource holding the spatial grid for this frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpatialGrid {
    /// Map from cell coordinates to entity list
    cells: HashMap<(i32, i32), Vec<Entity>>,
}

impl SpatialGrid {
    /// Compute grid cell coordinates for a world position
    fn world_to_cell(pos: Vec2) -> (i32, i32) {
        let x = (pos.x / GRID_CELL_SIZE).floor() as i32;
        let y = (pos.y / GRID_CELL_SIZE).floor() as i32;
        (x, y)
    }

    /// Insert an entity at a position. Call after clear() for bulk rebuild.
    pub fn insert(&mut self, entity: Entity, pos: Vec2) {
        let cell = Self::world_to_cell(pos);
        self.cells.entry(cell).or_default().push(entity);
    }

    /// Empty every cell but keep the cells and their allocations, so the
    /// next rebuild reuses them.
    pub fn clear(&mut self) {
        for v in self.cells.values_mut() {
            v.clear();
        }
    }

    /// Get all entities whose cell lies within `reach` of `pos` on both axes,
    /// excluding `entity`.
    ///
    /// The grid is a conservative over-approximation: callers must run the
    /// exact box test themselves.  Results are sorted so iteration order does
    /// not depend on hash order.
    pub fn get_neighbors_excluding(&self, entity: Entity, pos: Vec2, reach: f32) -> Vec<Entity> {
        let (min_x, min_y) = Self::world_to_cell(pos - Vec2::splat(reach));
        let (max_x, max_y) = Self::world_to_cell(pos + Vec2::splat(reach));

        let mut neighbors = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                if let Some(entities) = self.cells.get(&(cx, cy)) {
                    neighbors.extend(entities.iter().copied().filter(|&e| e != entity));
                }
            }
        }
        neighbors.sort();
        neighbors
    }
}

/// System to rebuild the spatial grid each frame.
/// Must run after wrapping and BEFORE the bumper pass.
pub fn rebuild_spatial_grid_system(
    mut grid: ResMut<SpatialGrid>,
    query: Query<(Entity, &Transform), With<Collidable>>,
) {
    grid.clear();

    for (entity, transform) in query.iter() {
        grid.insert(entity, transform.translation.truncate());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_come_from_adjacent_cells_only() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let far = world.spawn_empty().id();

        let mut grid = SpatialGrid::default();
        grid.insert(a, Vec2::new(10.0, 10.0));
        grid.insert(b, Vec2::new(-30.0, 60.0));
        grid.insert(far, Vec2::new(390.0, -290.0));

        let found = grid.get_neighbors_excluding(a, Vec2::new(10.0, 10.0), 60.0);
        assert_eq!(found, vec![b]);
    }

    #[test]
    fn clear_empties_every_cell() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut grid = SpatialGrid::default();
        grid.insert(a, Vec2::ZERO);
        grid.clear();
        assert!(grid
            .get_neighbors_excluding(Entity::PLACEHOLDER, Vec2::ZERO, 50.0)
            .is_empty());
        // The emptied cell stays allocated for the next rebuild.
        assert_eq!(grid.cells.len(), 1);

        grid.insert(a, Vec2::new(20.0, 20.0));
        assert_eq!(
            grid.get_neighbors_excluding(Entity::PLACEHOLDER, Vec2::ZERO, 50.0),
            vec![a]
        );
        assert_eq!(grid.cells.len(), 1);
    }
}
