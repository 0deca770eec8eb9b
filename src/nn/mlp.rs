//! Multi-Layer Perceptron (MLP) - Generic feedforward neural network
//!
//! Shared building block of the actor and both critic heads.

use std::iter;

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::{activation::relu, backend::Backend},
};

/// Configuration for Multi-Layer Perceptron
#[derive(Config, Debug)]
pub struct MLPConfig {
    /// Input dimension
    pub input_dim: usize,
    /// Hidden layer dimensions (e.g., [256, 256] for two hidden layers of 256 units each)
    pub hidden_layers: Vec<usize>,
    /// Output dimension
    pub output_dim: usize,
}

/// Multi-Layer Perceptron implementation
///
/// Hidden layers use ReLU activation, the output layer is linear.
#[derive(Module, Debug)]
pub struct MLP<B: Backend> {
    pub(crate) layers: Vec<Linear<B>>,
}

impl MLPConfig {
    /// Initialize the MLP with the given configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> MLP<B> {
        let dims: Vec<usize> = iter::once(self.input_dim)
            .chain(self.hidden_layers.iter().copied())
            .chain(iter::once(self.output_dim))
            .collect();

        let layers = dims
            .windows(2)
            .map(|pair| LinearConfig::new(pair[0], pair[1]).init(device))
            .collect();

        MLP { layers }
    }
}

impl<B: Backend> MLP<B> {
    /// Generic forward pass - works with any tensor dimension
    ///
    /// The last dimension is always treated as the feature dimension.
    pub fn forward<const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        let mut x = input;
        let Some((output, hidden)) = self.layers.split_last() else {
            return x;
        };

        for layer in hidden {
            x = relu(layer.forward(x));
        }

        output.forward(x)
    }

    /// Forward pass with tanh output activation, bounded in [-1, 1]
    pub fn forward_tanh<const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        self.forward(input).tanh()
    }

    /// All weights and biases flattened in layer order
    pub fn parameters(&self) -> Vec<f32> {
        let mut values = Vec::with_capacity(self.num_params());
        for layer in &self.layers {
            values.extend(layer.weight.val().into_data().iter::<f32>());
            if let Some(bias) = &layer.bias {
                values.extend(bias.val().into_data().iter::<f32>());
            }
        }
        values
    }

    /// True when no parameter is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.parameters().iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};

    #[test]
    fn test_mlp_forward_1d() {
        let device = NdArrayDevice::default();

        // Create a simple MLP: 4 → [64, 64] → 2
        let config = MLPConfig::new(4, vec![64, 64], 2);
        let mlp = config.init::<NdArray>(&device);

        let input = Tensor::<NdArray, 1>::random(
            [4],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );

        let output: Tensor<NdArray, 1> = mlp.forward(input);

        assert_eq!(output.shape().dims, [2]);
    }

    #[test]
    fn test_mlp_forward_2d() {
        let device = NdArrayDevice::default();

        let config = MLPConfig::new(4, vec![64, 64], 2);
        let mlp = config.init::<NdArray>(&device);

        // Batch of 8 states: [batch, features]
        let input = Tensor::<NdArray, 2>::random(
            [8, 4],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );

        let output: Tensor<NdArray, 2> = mlp.forward(input);

        assert_eq!(output.shape().dims, [8, 2]);
    }

    #[test]
    fn test_mlp_no_hidden_layers() {
        let device = NdArrayDevice::default();

        // Direct connection: 4 → 2
        let config = MLPConfig::new(4, vec![], 2);
        let mlp = config.init::<NdArray>(&device);

        let input = Tensor::<NdArray, 2>::random([1, 4], burn::tensor::Distribution::Default, &device);
        let output = mlp.forward(input);

        assert_eq!(output.shape().dims, [1, 2]);
    }

    #[test]
    fn test_mlp_forward_tanh() {
        let device = NdArrayDevice::default();

        let config = MLPConfig::new(4, vec![64], 2);
        let mlp = config.init::<NdArray>(&device);

        let input = Tensor::<NdArray, 2>::random([3, 4], burn::tensor::Distribution::Default, &device);
        let output: Tensor<NdArray, 2> = mlp.forward_tanh(input);

        assert_eq!(output.shape().dims, [3, 2]);

        let data = output.to_data();
        for &value in data.as_slice::<f32>().unwrap() {
            assert!((-1.0..=1.0).contains(&value), "Tanh output should be in [-1, 1], got {}", value);
        }
    }

    #[test]
    fn test_parameters_cover_weights_and_biases() {
        let device = NdArrayDevice::default();

        // 3*5 + 5 + 5*2 + 2
        let mlp = MLPConfig::new(3, vec![5], 2).init::<NdArray>(&device);
        let params = mlp.parameters();

        assert_eq!(params.len(), 32);
        assert_eq!(params.len(), mlp.num_params());
        assert!(mlp.is_finite());
    }
}
