use burn::{module::Module, prelude::*, tensor::backend::Backend};

use super::{soft_update::SoftUpdate, MLPConfig, MLP};

/// Configuration for the deterministic policy network
#[derive(Config, Debug)]
pub struct ActorConfig {
    pub state_dim: usize,
    pub action_dim: usize,
    pub hidden_layers: Vec<usize>,
    /// Scale applied to the tanh output
    #[config(default = 1.0)]
    pub max_action: f32,
}

/// Deterministic policy `state -> max_action * tanh(mlp(state))`
///
/// The output is the raw action; clipping into the action space is left to the
/// caller.
#[derive(Module, Debug)]
pub struct Actor<B: Backend> {
    mlp: MLP<B>,
    max_action: f32,
}

impl ActorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Actor<B> {
        Actor {
            mlp: MLPConfig::new(self.state_dim, self.hidden_layers.clone(), self.action_dim)
                .init(device),
            max_action: self.max_action,
        }
    }
}

impl<B: Backend> Actor<B> {
    /// `[batch, state_dim] -> [batch, action_dim]`
    pub fn forward(&self, state: Tensor<B, 2>) -> Tensor<B, 2> {
        self.mlp.forward_tanh(state).mul_scalar(self.max_action)
    }

    pub fn parameters(&self) -> Vec<f32> {
        self.mlp.parameters()
    }

    pub fn is_finite(&self) -> bool {
        self.mlp.is_finite()
    }
}

impl<B: Backend> SoftUpdate for Actor<B> {
    fn soft_update(self, source: &Self, tau: f32) -> Self {
        Self {
            mlp: self.mlp.soft_update(&source.mlp, tau),
            max_action: self.max_action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};

    #[test]
    fn output_is_scaled_tanh() {
        let device = NdArrayDevice::default();
        let actor = ActorConfig::new(3, 2, vec![16])
            .with_max_action(2.0)
            .init::<NdArray>(&device);

        let states = Tensor::<NdArray, 2>::random(
            [32, 3],
            burn::tensor::Distribution::Uniform(-100.0, 100.0),
            &device,
        );
        let actions = actor.forward(states);

        assert_eq!(actions.dims(), [32, 2]);
        for &a in actions.to_data().as_slice::<f32>().unwrap() {
            assert!(a.abs() <= 2.0);
        }
    }

    #[test]
    fn forward_is_deterministic() {
        let device = NdArrayDevice::default();
        let actor = ActorConfig::new(3, 1, vec![16]).init::<NdArray>(&device);
        let state = Tensor::<NdArray, 2>::from_floats([[0.1, -0.2, 0.3]], &device);

        let a = actor.forward(state.clone()).into_data();
        let b = actor.forward(state).into_data();
        assert_eq!(a.as_slice::<f32>().unwrap(), b.as_slice::<f32>().unwrap());
    }
}
