//! Environment contract consumed by the agent and the training driver

mod action_space;

pub use action_space::ActionSpace;

/// Outcome of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub next_state: Vec<f32>,
    pub reward: f32,
    /// The episode ended with this step
    pub terminal: bool,
}

/// A continuous-control environment with fixed-length state and action vectors
///
/// Dimensions never change over the lifetime of an environment, the agent reads
/// them once at construction.
pub trait Environment {
    /// Length of the state vector
    fn state_dim(&self) -> usize;

    /// The bounded box actions must lie in
    fn action_space(&self) -> ActionSpace;

    /// Start a new episode and return its initial state
    fn reset(&mut self) -> Vec<f32>;

    /// Apply an action and advance the environment by one step
    fn step(&mut self, action: &[f32]) -> Step;
}
