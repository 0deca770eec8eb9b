//! Twin Delayed Deep Deterministic Policy Gradient (TD3)
//!
//! TD3 is an off-policy actor-critic algorithm for continuous action spaces.
//! It improves upon DDPG with three key innovations:
//! 1. Twin critic networks to reduce overestimation bias
//! 2. Delayed policy updates (update actor less frequently than critics)
//! 3. Target policy smoothing (add noise to target actions)
//!
//! # Algorithm Overview
//!
//! The agent maintains:
//! - **Actor network**: deterministic actions a = π(s)
//! - **Twin critic**: two Q-value estimates Q₁(s,a) and Q₂(s,a)
//! - **Target networks**: slowly-updated copies of actor and critics
//!
//! Training runs in two phases. For the first `exploration_steps` steps
//! actions are sampled uniformly from the action space to fill the replay
//! memory. After that every step adds Gaussian noise to the policy action and
//! runs one learning step:
//! - critics regress onto `r + γ · min(Q₁', Q₂')(s', clip(π'(s') + ε))`
//! - every `policy_update_freq` steps the actor ascends Q₁(s, π(s)) and the
//!   targets move toward the trainable networks by τ
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use burn::backend::{Autodiff, NdArray};
//! use td3::{
//!     algo::td3::{Td3Agent, Td3Config},
//!     env::Environment,
//!     gym::Pendulum,
//!     traits::TrainableAgent,
//! };
//!
//! let mut env = Pendulum::new(200);
//! let config = Td3Config::new().with_exploration_steps(1_000);
//! let mut agent: Td3Agent<Autodiff<NdArray>> =
//!     Td3Agent::new(env.state_dim(), env.action_space(), config, Default::default())?;
//!
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
//!
//! # Hyperparameters
//!
//! Defaults ([`Td3Config::new`]):
//! - **Replay buffer**: 1M transitions, batches of 256
//! - **Learning rates**: 3e-4 for actor and critics
//! - **Discount (γ)**: 0.99
//! - **Soft update (τ)**: 0.005
//! - **Policy delay**: 2
//! - **Exploration**: 25k uniform steps, then N(0, 0.1) action noise
//! - **Target smoothing**: N(0, 0.2) clipped to ±0.5
//!
//! Reference: "Addressing Function Approximation Error in Actor-Critic Methods" (Fujimoto et al., 2018)

mod agent;
pub mod checkpoint;
mod config;
pub mod target;

pub use agent::{Phase, Td3Agent};
pub use checkpoint::{run_name, CheckpointRecord, CHECKPOINT_VERSION};
pub use config::Td3Config;
