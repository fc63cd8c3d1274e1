//! Fixed-topology neural controller.
//!
//! Every entity is driven by an 8-16-2 feed-forward network with tanh on both
//! layers. The network is never trained; it only changes through mutation and
//! crossover when a new generation is bred.

use ndarray::{Array1, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod mlp;

pub use mlp::Mlp;

/// Number of sensor inputs.
pub const INPUT_SIZE: usize = 8;
/// Number of hidden units.
pub const HIDDEN_SIZE: usize = 16;
/// Number of action outputs (forward intent, turn intent).
pub const OUTPUT_SIZE: usize = 2;

/// Half-width of the uniform range used for fresh weights and biases.
const INIT_SCALE: f32 = 1.0;

/// Layer activations of the most recent forward pass, kept for visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activations {
    /// Sensor inputs as fed to the network.
    pub input: Array1<f32>,
    /// Hidden layer after tanh.
    pub hidden: Array1<f32>,
    /// Output layer after tanh.
    pub output: Array1<f32>,
}

impl Default for Activations {
    fn default() -> Self {
        Self {
            input: Array1::zeros(INPUT_SIZE),
            hidden: Array1::zeros(HIDDEN_SIZE),
            output: Array1::zeros(OUTPUT_SIZE),
        }
    }
}

/// Two-layer perceptron mapping sensors to `[forward, turn]` intents in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Input to hidden layer.
    pub hidden: Mlp,
    /// Hidden to output layer.
    pub output: Mlp,
}

impl Brain {
    /// Layer sizes from input to output.
    pub const SHAPE: [usize; 3] = [INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE];

    /// Creates a brain with all parameters uniform in [-1, 1].
    pub fn new_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            hidden: Mlp::new_random(INPUT_SIZE, HIDDEN_SIZE, INIT_SCALE, rng),
            output: Mlp::new_random(HIDDEN_SIZE, OUTPUT_SIZE, INIT_SCALE, rng),
        }
    }

    /// Layer sizes as stored, for validating deserialized brains.
    pub fn shape(&self) -> Vec<usize> {
        vec![
            self.hidden.input_size(),
            self.hidden.output_size(),
            self.output.output_size(),
        ]
    }

    /// Whether this brain has the fixed 8-16-2 topology with matching biases.
    pub fn is_well_formed(&self) -> bool {
        self.shape() == Self::SHAPE
            && self.output.input_size() == HIDDEN_SIZE
            && self.hidden.is_consistent()
            && self.output.is_consistent()
    }

    /// Computes `tanh(W2 · tanh(W1·x + b1) + b2)`.
    ///
    /// Inputs are not range-checked; every output lies in [-1, 1].
    #[inline]
    pub fn forward(&self, inputs: &[f32; INPUT_SIZE]) -> [f32; OUTPUT_SIZE] {
        let hidden = self.hidden.forward(ArrayView1::from(&inputs[..]));
        let output = self.output.forward(hidden.view());
        [output[0], output[1]]
    }

    /// Forward pass that also returns every layer's activations.
    pub fn forward_traced(&self, inputs: &[f32; INPUT_SIZE]) -> Activations {
        let input = Array1::from(inputs.to_vec());
        let hidden = self.hidden.forward(input.view());
        let output = self.output.forward(hidden.view());
        Activations {
            input,
            hidden,
            output,
        }
    }

    /// Perturbs each weight and bias with probability `rate` by N(0, `std_dev`) noise.
    /// No clamping is applied.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, std_dev: f32, rng: &mut R) {
        self.hidden.mutate(rate, std_dev, rng);
        self.output.mutate(rate, std_dev, rng);
    }

    /// Uniform per-parameter crossover of two brains.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Brain, rng: &mut R) -> Brain {
        Brain {
            hidden: Mlp::crossover(&self.hidden, &other.hidden, rng),
            output: Mlp::crossover(&self.output, &other.output, rng),
        }
    }

    /// Euclidean distance between the flattened parameters of two brains.
    pub fn distance(&self, other: &Brain) -> f32 {
        (self.hidden.squared_distance(&other.hidden) + self.output.squared_distance(&other.output))
            .sqrt()
    }

    /// Flattens all weights and biases, layer by layer.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(
            INPUT_SIZE * HIDDEN_SIZE + HIDDEN_SIZE + HIDDEN_SIZE * OUTPUT_SIZE + OUTPUT_SIZE,
        );
        for layer in [&self.hidden, &self.output] {
            flat.extend(layer.weights.iter().copied());
            flat.extend(layer.biases.iter().copied());
        }
        flat
    }
}
