//! Generational selector.
//!
//! Ranks the living population by fitness, keeps the best entities untouched
//! and refills the population with mutated copies of their genomes.

use rand::Rng;
use tracing::{info, warn};

use super::brain::Brain;
use super::ecosystem::Ecosystem;
use super::genome::{Genome, Trait};
use super::physics::Physics;
use super::stats::PopulationStats;

/// Indices of `fitness` ordered by descending value. Ties keep their original order.
pub fn rank_by_fitness(fitness: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    order
}

impl<P: Physics> Ecosystem<P> {
    /// Replaces the population with the fittest survivors plus mutated offspring.
    ///
    /// Survivors keep their identity, body and state. Each offspring copies the
    /// genome of a survivor picked uniformly at random and mutates it at that
    /// genome's own mutation-rate trait. Offspring get a fresh random brain, or a
    /// crossover of two survivors' brains when `inherit_brain` is set.
    ///
    /// # Returns
    ///
    /// Statistics of the population before replacement.
    pub fn next_generation(&mut self) -> PopulationStats {
        let before = PopulationStats::collect(self);
        self.history.record(before);

        let fitness: Vec<f32> = self.entities.iter().map(|e| e.fitness()).collect();
        let order = rank_by_fitness(&fitness);
        let keep = self.params.survivor_count(order.len());

        let mut slots: Vec<_> = self.entities.drain(..).map(Some).collect();
        let survivors: Vec<_> = order[..keep]
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
        for culled in slots.into_iter().flatten() {
            culled.release(&mut self.physics);
        }
        self.entities = survivors;
        if self.selected().is_none() {
            self.clear_selection();
        }

        let survivor_count = self.entities.len();
        if survivor_count == 0 {
            warn!(
                generation = self.generation,
                "no survivors, reseeding population from random genomes"
            );
            while self.entities.len() < self.params.population_size {
                self.spawn_entity(None, None);
            }
        } else {
            while self.entities.len() < self.params.population_size {
                let parent = self.rng.random_range(0..survivor_count);
                let (genome, brain) = self.breed(parent, survivor_count);
                self.spawn_entity_with_brain(None, genome, brain);
            }
        }

        self.generation += 1;
        info!(
            generation = self.generation,
            survivors = survivor_count,
            population = self.entities.len(),
            best_fitness = before.max_fitness,
            mean_fitness = before.mean_fitness,
            "generation complete"
        );
        before
    }

    /// Mutated genome and brain for a child of survivor `parent`.
    fn breed(&mut self, parent: usize, survivor_count: usize) -> (Genome, Brain) {
        let parent_genome = &self.entities[parent].genome;
        let rate = parent_genome.get_effective_trait(Trait::MutationRate);
        let mut genome = parent_genome.copy();
        genome.mutate_with_step(rate, self.params.genome_mutation_step, &mut self.rng);

        let brain = if self.params.inherit_brain {
            let mate = self.rng.random_range(0..survivor_count);
            let mut brain = self.entities[parent]
                .brain
                .crossover(&self.entities[mate].brain, &mut self.rng);
            brain.mutate(rate, self.params.brain_mutation_std, &mut self.rng);
            brain
        } else {
            Brain::new_random(&mut self.rng)
        };

        (genome, brain)
    }
}
