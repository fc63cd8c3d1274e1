//! Queue of meals being digested.

use serde::{Deserialize, Serialize};

/// A meal in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Energy still to be released.
    pub remaining_energy: f32,
    /// Time until digestion completes.
    pub remaining_time: f32,
    /// Size of the eaten food.
    pub size: f32,
    /// Quality of the eaten food.
    pub quality: f32,
}

impl Meal {
    /// Releases the share of remaining energy due over `dt` and counts the time down.
    fn digest(&mut self, dt: f32) -> f32 {
        if self.remaining_time <= 0.0 {
            return 0.0;
        }
        let slice = self.remaining_energy * dt.min(self.remaining_time) / self.remaining_time;
        self.remaining_energy -= slice;
        self.remaining_time -= dt;
        slice
    }
}

/// Result of advancing the queue by one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DigestionStep {
    /// Energy released by every meal this tick, in queue order.
    pub released: Vec<f32>,
    /// Meals that finished this tick.
    pub completed: Vec<Meal>,
}

impl DigestionStep {
    /// Total energy released this tick.
    pub fn total_released(&self) -> f32 {
        self.released.iter().sum()
    }
}

/// Ordered meals awaiting digestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigestionQueue {
    meals: Vec<Meal>,
}

impl DigestionQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a meal.
    pub fn push(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    /// Number of meals in progress.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Whether nothing is being digested.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Meals in queue order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Advances every meal by `dt` and removes the finished ones.
    pub fn advance(&mut self, dt: f32) -> DigestionStep {
        let mut step = DigestionStep::default();
        for meal in &mut self.meals {
            step.released.push(meal.digest(dt));
        }

        let (done, pending): (Vec<Meal>, Vec<Meal>) = self
            .meals
            .drain(..)
            .partition(|meal| meal.remaining_time <= 0.0);
        self.meals = pending;
        step.completed = done;
        step
    }
}
