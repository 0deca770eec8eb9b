//! Agent interaction contract used by training drivers
//!
//! A driver alternates between asking the agent for an action and reporting the
//! outcome of that action. Learning happens inside `observe`, so a driver never
//! has to know when the agent trains:
//!
//! ```ignore
//! let mut state = env.reset();
//! loop {
//!     let action = agent.select_action(&state)?;
//!     let step = env.step(&action);
//!     agent.observe(&step.next_state, step.reward, step.terminal)?;
//!     if step.terminal {
//!         break;
//!     }
//!     state = step.next_state;
//! }
//! ```

use std::{collections::HashMap, path::Path};

use crate::error::Result;

/// Training metrics returned after each learning step
#[derive(Clone, Debug, Default)]
pub struct TrainingMetrics {
    /// Actor loss, only present on steps where the actor was updated
    pub policy_loss: Option<f32>,

    /// Combined twin-critic loss
    pub value_loss: f32,

    /// Number of gradient updates performed
    pub n_updates: usize,

    /// Additional algorithm-specific metrics
    pub extra: HashMap<String, f32>,
}

/// Trait for agents that learn online from a stream of transitions
pub trait TrainableAgent {
    /// Choose an action for `state` and remember the pair until the matching
    /// [`observe`](TrainableAgent::observe)
    fn select_action(&mut self, state: &[f32]) -> Result<Vec<f32>>;

    /// Report the outcome of the last selected action
    ///
    /// Returns metrics when a learning step ran.
    fn observe(
        &mut self,
        next_state: &[f32],
        reward: f32,
        terminal: bool,
    ) -> Result<Option<TrainingMetrics>>;

    /// Get total number of environment steps observed
    fn total_steps(&self) -> usize;

    /// One-line summary of the agent's state for progress logs
    fn stats(&self) -> String;

    /// Make agent act greedily without storing or learning
    fn eval(&mut self);

    /// Make agent explore, store and learn
    fn train(&mut self);

    fn is_training(&self) -> bool;
}

/// Agents whose trainable parameters can be persisted
pub trait Checkpointable {
    /// Deterministic name derived from hyperparameters, used for file names
    fn run_name(&self) -> String;

    fn save(&self, path: &Path) -> Result<()>;

    fn load(&mut self, path: &Path) -> Result<()>;
}
