use burn::config::Config;

use crate::error::Error;

/// Hyperparameters of the [`Td3Agent`](super::Td3Agent)
///
/// Defaults follow Fujimoto et al. (2018). Being a burn [`Config`], it can be
/// built with `Td3Config::new().with_batch_size(128)` or read from JSON with
/// `Td3Config::load(path)`.
#[derive(Config, Debug)]
pub struct Td3Config {
    // Optimisation
    /// Actor learning rate
    #[config(default = 3e-4)]
    pub actor_lr: f64,
    /// Critic learning rate
    #[config(default = 3e-4)]
    pub critic_lr: f64,
    /// Discount factor γ
    #[config(default = 0.99)]
    pub discount: f32,
    /// Soft update coefficient τ
    #[config(default = 0.005)]
    pub tau: f32,
    /// Actor updates and target synchronisation happen every N steps
    #[config(default = 2)]
    pub policy_update_freq: usize,
    /// Gradient clipping value, disabled by default
    #[config(default = "None")]
    pub gradient_clip: Option<f32>,

    // Memory
    /// Transitions sampled per learning step
    #[config(default = 256)]
    pub batch_size: usize,
    /// Replay memory capacity
    #[config(default = 1_000_000)]
    pub memory_capacity: usize,

    // Exploration
    /// Steps of uniformly random actions before the policy is used
    #[config(default = 25_000)]
    pub exploration_steps: usize,
    /// Std of Gaussian noise added to policy actions while training
    #[config(default = 0.1)]
    pub exploration_noise: f32,
    /// Std of the smoothing noise added to target actions
    #[config(default = 0.2)]
    pub target_policy_noise: f32,
    /// Target smoothing noise is clipped to `[-c, c]`
    #[config(default = 0.5)]
    pub target_noise_clip: f32,

    // Networks
    /// Units per hidden layer, shared by actor and critics
    #[config(default = 256)]
    pub hidden_size: usize,
    /// Number of hidden layers
    #[config(default = 2)]
    pub hidden_depth: usize,

    /// Seed for the agent RNG and the backend; entropy when unset
    #[config(default = "None")]
    pub seed: Option<u64>,
}

impl Td3Config {
    pub fn hidden_layers(&self) -> Vec<usize> {
        vec![self.hidden_size; self.hidden_depth]
    }

    /// Reject values the learning loop cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if self.batch_size == 0 {
            return invalid("batch_size must be positive".into());
        }
        if self.memory_capacity == 0 {
            return invalid("memory_capacity must be positive".into());
        }
        if self.policy_update_freq == 0 {
            return invalid("policy_update_freq must be positive".into());
        }
        if self.hidden_size == 0 {
            return invalid("hidden_size must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.tau) {
            return invalid(format!("tau must lie in [0, 1], got {}", self.tau));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return invalid(format!("discount must lie in [0, 1], got {}", self.discount));
        }
        for (name, value) in [
            ("exploration_noise", self.exploration_noise),
            ("target_policy_noise", self.target_policy_noise),
            ("target_noise_clip", self.target_noise_clip),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return invalid(format!("{name} must be a finite non-negative number, got {value}"));
            }
        }
        if !(self.actor_lr > 0.0 && self.critic_lr > 0.0) {
            return invalid("learning rates must be positive".into());
        }
        Ok(())
    }
}
