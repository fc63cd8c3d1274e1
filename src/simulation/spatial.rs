//! Spatial indexing for nearest-food and crowding queries.
//!
//! Positions are snapshotted into KD-trees once per tick, before the parallel
//! update phase, so every entity sees the same world regardless of update order.

use geo::Point;
use kdtree::distance::squared_euclidean;
use kdtree::KdTree;
use tracing::warn;

use super::entity::{EntityId, EntityRef, FoodSighting, WorldView};

/// 2D KD-tree keyed by slot index.
pub type Tree2D = KdTree<f32, usize, [f32; 2]>;

/// KD-trees over food and entity positions.
pub struct SpatialIndex {
    food: Tree2D,
    food_positions: Vec<Point<f32>>,
    entities: Tree2D,
    entity_positions: Vec<(EntityId, Point<f32>)>,
}

impl SpatialIndex {
    /// Builds an index from food centers and `(id, center)` pairs of entities.
    ///
    /// # Arguments
    ///
    /// * `food` - Food centers, indexed like the world's food list
    /// * `entities` - Entity identities and centers
    ///
    /// Points with non-finite coordinates are left out of the trees and never
    /// returned by queries.
    pub fn build(food: Vec<Point<f32>>, entities: Vec<(EntityId, Point<f32>)>) -> Self {
        Self {
            food: build_tree(food.iter().copied()),
            food_positions: food,
            entities: build_tree(entities.iter().map(|(_, p)| *p)),
            entity_positions: entities,
        }
    }

    /// Number of indexed food items.
    pub fn food_count(&self) -> usize {
        self.food_positions.len()
    }

    /// Number of indexed entities.
    pub fn entity_count(&self) -> usize {
        self.entity_positions.len()
    }

    /// Food items whose centers lie within `radius` of `position`, as `(index, distance)`.
    pub fn food_within(&self, position: Point<f32>, radius: f32) -> Vec<(usize, f32)> {
        self.food
            .within(&[position.x(), position.y()], radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist_sq, &idx)| (idx, dist_sq.sqrt()))
            .collect()
    }
}

impl WorldView for SpatialIndex {
    fn nearest_food(&self, position: Point<f32>) -> Option<FoodSighting> {
        let nearest = self
            .food
            .nearest(&[position.x(), position.y()], 1, &squared_euclidean)
            .ok()?;
        let &(dist_sq, &index) = nearest.first()?;
        Some(FoodSighting {
            index,
            position: self.food_positions[index],
            distance: dist_sq.sqrt(),
        })
    }

    fn neighbors_within(&self, position: Point<f32>, radius: f32) -> Vec<EntityRef> {
        self.entities
            .within(&[position.x(), position.y()], radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist_sq, &slot)| {
                let (id, position) = self.entity_positions[slot];
                EntityRef {
                    id,
                    position,
                    distance: dist_sq.sqrt(),
                }
            })
            .collect()
    }
}

/// Builds a KD-tree whose payload is each point's position in the input order.
fn build_tree(points: impl ExactSizeIterator<Item = Point<f32>>) -> Tree2D {
    let mut tree = KdTree::with_capacity(2, points.len().max(1));
    for (i, p) in points.enumerate() {
        if let Err(err) = tree.add([p.x(), p.y()], i) {
            warn!(?err, slot = i, "point left out of spatial index");
        }
    }
    tree
}
