use burn::{module::Module, prelude::*, tensor::backend::Backend};

use super::{soft_update::SoftUpdate, MLPConfig, MLP};

/// Configuration for the pair of action-value networks
#[derive(Config, Debug)]
pub struct TwinCriticConfig {
    pub state_dim: usize,
    pub action_dim: usize,
    pub hidden_layers: Vec<usize>,
}

/// Two independently initialised Q-networks over `concat(state, action)`
///
/// Both heads are trained on the same target; only the first one drives the
/// actor objective.
#[derive(Module, Debug)]
pub struct TwinCritic<B: Backend> {
    q1: MLP<B>,
    q2: MLP<B>,
}

impl TwinCriticConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TwinCritic<B> {
        let head = MLPConfig::new(
            self.state_dim + self.action_dim,
            self.hidden_layers.clone(),
            1,
        );
        TwinCritic {
            q1: head.init(device),
            q2: head.init(device),
        }
    }
}

impl<B: Backend> TwinCritic<B> {
    /// Both value estimates, each `[batch, 1]`
    pub fn forward(&self, state: Tensor<B, 2>, action: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let input = Tensor::cat(vec![state, action], 1);
        (self.q1.forward(input.clone()), self.q2.forward(input))
    }

    /// First head only
    pub fn q1(&self, state: Tensor<B, 2>, action: Tensor<B, 2>) -> Tensor<B, 2> {
        self.q1.forward(Tensor::cat(vec![state, action], 1))
    }

    /// Parameters of both heads, first head first
    pub fn parameters(&self) -> Vec<f32> {
        let mut values = self.q1.parameters();
        values.extend(self.q2.parameters());
        values
    }

    pub fn is_finite(&self) -> bool {
        self.q1.is_finite() && self.q2.is_finite()
    }
}

impl<B: Backend> SoftUpdate for TwinCritic<B> {
    fn soft_update(self, source: &Self, tau: f32) -> Self {
        Self {
            q1: self.q1.soft_update(&source.q1, tau),
            q2: self.q2.soft_update(&source.q2, tau),
        }
    }
}
