//! Small feed-forward network evaluator (768 -> 8 -> 8 -> 1).
//!
//! The parameters come from an external training run. They are validated once
//! when the evaluator is built; a network that was constructed successfully
//! can always evaluate.

use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{Evaluator, Score};
use crate::board::Position;

use super::features::{encode, FeatureVector, FEATURE_COUNT};
use super::terminal_score;

pub const HIDDEN_SIZE: usize = 8;

/// Upper bound of the clipped ReLU applied after each hidden layer.
const ACTIVATION_CLIP: f32 = 127.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkLoadError {
    #[error("layer {layer} {tensor}: expected {expected} values, found {found}")]
    ShapeMismatch {
        layer: &'static str,
        tensor: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} network parameters, found {found}")]
    ParameterCount { expected: usize, found: usize },
    #[error("layer {layer} has a non-finite parameter at index {index}")]
    NonFinite { layer: &'static str, index: usize },
}

/// Parameters of one fully connected layer. `weights` is row-major with one
/// row of `inputs` values per output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerParams {
    pub weights: Vec<f32>,
    pub biases: Vec<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkParams {
    pub hidden1: LayerParams,
    pub hidden2: LayerParams,
    pub output: LayerParams,
}

const LAYER_SHAPES: [(&str, usize, usize); 3] = [
    ("hidden1", FEATURE_COUNT, HIDDEN_SIZE),
    ("hidden2", HIDDEN_SIZE, HIDDEN_SIZE),
    ("output", HIDDEN_SIZE, 1),
];

impl NetworkParams {
    /// Total number of weights and biases in the network.
    pub const PARAMETER_COUNT: usize = FEATURE_COUNT * HIDDEN_SIZE
        + HIDDEN_SIZE
        + HIDDEN_SIZE * HIDDEN_SIZE
        + HIDDEN_SIZE
        + HIDDEN_SIZE
        + 1;

    /// Splits a flat parameter list, laid out layer by layer as weights then
    /// biases, into per-layer parameters.
    pub fn from_flat(values: &[f32]) -> Result<Self, NetworkLoadError> {
        if values.len() != Self::PARAMETER_COUNT {
            return Err(NetworkLoadError::ParameterCount {
                expected: Self::PARAMETER_COUNT,
                found: values.len(),
            });
        }

        let mut rest = values;
        let mut layers = LAYER_SHAPES.iter().map(|&(_, inputs, outputs)| {
            let (weights, tail) = rest.split_at(inputs * outputs);
            let (biases, tail) = tail.split_at(outputs);
            rest = tail;
            LayerParams {
                weights: weights.to_vec(),
                biases: biases.to_vec(),
            }
        });

        // The length check above guarantees three full layers.
        let hidden1 = layers.next().unwrap_or_default();
        let hidden2 = layers.next().unwrap_or_default();
        let output = layers.next().unwrap_or_default();

        Ok(Self {
            hidden1,
            hidden2,
            output,
        })
    }
}

#[derive(Clone, Debug)]
struct DenseLayer {
    inputs: usize,
    weights: Vec<f32>,
    biases: Vec<f32>,
}

impl DenseLayer {
    fn new(
        name: &'static str,
        params: LayerParams,
        inputs: usize,
        outputs: usize,
    ) -> Result<Self, NetworkLoadError> {
        check_len(name, "weights", &params.weights, inputs * outputs)?;
        check_len(name, "biases", &params.biases, outputs)?;

        let non_finite = params
            .weights
            .iter()
            .chain(params.biases.iter())
            .position(|value| !value.is_finite());
        if let Some(index) = non_finite {
            return Err(NetworkLoadError::NonFinite { layer: name, index });
        }

        Ok(Self {
            inputs,
            weights: params.weights,
            biases: params.biases,
        })
    }

    /// `output[j] = biases[j] + sum_i weights[j][i] * input[i]`. Zero inputs are
    /// skipped, which makes the first layer cost proportional to the number
    /// of pieces rather than to the input width.
    fn forward(&self, input: &[f32], output: &mut [f32]) {
        output.copy_from_slice(&self.biases);
        for (i, &x) in input.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            for (j, out) in output.iter_mut().enumerate() {
                *out += self.weights[j * self.inputs + i] * x;
            }
        }
    }
}

fn check_len(
    layer: &'static str,
    tensor: &'static str,
    values: &[f32],
    expected: usize,
) -> Result<(), NetworkLoadError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(NetworkLoadError::ShapeMismatch {
            layer,
            tensor,
            expected,
            found: values.len(),
        })
    }
}

fn clipped_relu(values: &mut [f32]) {
    for value in values.iter_mut() {
        *value = value.max(0.0).min(ACTIVATION_CLIP);
    }
}

#[derive(Clone, Debug)]
pub struct NeuralEvaluator {
    hidden1: DenseLayer,
    hidden2: DenseLayer,
    output: DenseLayer,
}

impl NeuralEvaluator {
    pub fn new(params: NetworkParams) -> Result<Self, NetworkLoadError> {
        let [(name1, in1, out1), (name2, in2, out2), (name3, in3, out3)] = LAYER_SHAPES;
        Ok(Self {
            hidden1: DenseLayer::new(name1, params.hidden1, in1, out1)?,
            hidden2: DenseLayer::new(name2, params.hidden2, in2, out2)?,
            output: DenseLayer::new(name3, params.output, in3, out3)?,
        })
    }

    pub fn from_flat(values: &[f32]) -> Result<Self, NetworkLoadError> {
        Self::new(NetworkParams::from_flat(values)?)
    }

    /// Raw network output for an encoded position.
    pub fn forward(&self, features: &FeatureVector) -> f32 {
        let mut hidden1 = [0.0; HIDDEN_SIZE];
        self.hidden1.forward(features.as_slice(), &mut hidden1);
        clipped_relu(&mut hidden1);

        let mut hidden2 = [0.0; HIDDEN_SIZE];
        self.hidden2.forward(&hidden1, &mut hidden2);
        clipped_relu(&mut hidden2);

        let mut output = [0.0; 1];
        self.output.forward(&hidden2, &mut output);
        output[0]
    }
}

impl Evaluator<Position> for NeuralEvaluator {
    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn evaluate(&self, position: &Position) -> Score {
        match terminal_score(position) {
            Some(score) => score,
            None => self.forward(&encode(position)),
        }
    }
}
