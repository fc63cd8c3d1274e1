//! # Primordia - Hormone-Modulated Artificial Life
//!
//! A population of entities driven by small neural controllers whose physiology
//! comes from a genome overlaid with hormone modulation. Entities eat, digest,
//! age, reproduce and die, and are periodically replaced by a fitness-ranked
//! next generation.
//!
//! ## Features
//!
//! - Genome of 21 traits in 6 categories, modulated by 6 hormones
//! - Fixed 8-16-2 tanh controller, evolved by mutation and crossover only
//! - Physiological state machine with digestion queue and hormone feedback
//! - Parallel per-entity updates with a serial event phase
//! - Pluggable physics and renderer collaborators
//! - Seeded, reproducible runs; JSON config and population snapshots
//!
//! ## Core Modules
//!
//! - [`simulation::genome`] - Traits, hormones and effective values
//! - [`simulation::brain`] - Neural controller
//! - [`simulation::entity`] - Entity lifecycle
//! - [`simulation::ecosystem`] - World stepper
//! - [`simulation::evolution`] - Generational selector
//! - [`simulation::physics`] - Physics collaborator

/// Core simulation logic and data structures.
pub mod simulation {
    /// Neural controller.
    pub mod brain;
    /// World stepper owning entities, food and waste.
    pub mod ecosystem;
    /// Entity state, sensing and physiology.
    pub mod entity;
    /// Error types.
    pub mod error;
    /// Deferred world mutations applied after the parallel phase.
    pub mod events;
    /// Generational selection and refill.
    pub mod evolution;
    /// Food items.
    pub mod food;
    /// Genome, traits and hormones.
    pub mod genome;
    /// Geometric helpers.
    pub mod geometric_utils;
    /// Trait for objects backed by a physics body.
    ///
    /// Implemented by [`entity::Entity`], [`food::Food`] and [`waste::Waste`].
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// Physics collaborator interface and kinematic implementation.
    pub mod physics;
    /// Renderer collaborator interface.
    pub mod render;
    /// Seedable random source.
    pub mod rng;
    /// Population snapshots.
    pub mod snapshot;
    /// KD-tree world queries.
    pub mod spatial;
    /// Population statistics.
    pub mod stats;
    /// Digestion byproducts.
    pub mod waste;
}
