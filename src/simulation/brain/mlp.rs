//! Dense layer with tanh activation.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// One fully connected layer of the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Mlp {
    /// Creates a layer with weights and biases drawn uniformly from `[-scale, scale]`.
    pub fn new_random<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            weights: Array2::from_shape_fn((output_size, input_size), |_| {
                rng.random_range(-scale..=scale)
            }),
            biases: Array1::from_shape_fn(output_size, |_| rng.random_range(-scale..=scale)),
        }
    }

    /// Number of inputs this layer accepts.
    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of outputs this layer produces.
    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    /// `tanh(W·x + b)`.
    #[inline]
    pub fn forward(&self, inputs: ArrayView1<'_, f32>) -> Array1<f32> {
        let mut output = self.weights.dot(&inputs);
        output += &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }

    /// Adds N(0, `std_dev`) noise to each parameter independently with probability `rate`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, std_dev: f32, rng: &mut R) {
        let mut perturb = |value: &mut f32| {
            if rng.random::<f32>() < rate {
                *value += rng.sample::<f32, _>(StandardNormal) * std_dev;
            }
        };
        self.weights.iter_mut().for_each(&mut perturb);
        self.biases.iter_mut().for_each(&mut perturb);
    }

    /// Uniform crossover: every parameter is taken from either parent with probability 0.5.
    pub fn crossover<R: Rng + ?Sized>(parent1: &Mlp, parent2: &Mlp, rng: &mut R) -> Self {
        Self {
            weights: Array2::from_shape_fn(parent1.weights.dim(), |idx| {
                if rng.random_bool(0.5) {
                    parent1.weights[idx]
                } else {
                    parent2.weights[idx]
                }
            }),
            biases: Array1::from_shape_fn(parent1.biases.len(), |i| {
                if rng.random_bool(0.5) {
                    parent1.biases[i]
                } else {
                    parent2.biases[i]
                }
            }),
        }
    }

    /// Sum of squared parameter differences.
    pub(crate) fn squared_distance(&self, other: &Mlp) -> f32 {
        let weights: f32 = self
            .weights
            .iter()
            .zip(other.weights.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        let biases: f32 = self
            .biases
            .iter()
            .zip(other.biases.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        weights + biases
    }

    /// Whether the weight and bias shapes agree with each other.
    pub(crate) fn is_consistent(&self) -> bool {
        self.biases.len() == self.weights.nrows()
    }
}
