//! Neural network building blocks for the TD3 agent

pub mod actor;
pub mod critic;
pub mod mlp;
pub mod soft_update;

pub use actor::{Actor, ActorConfig};
pub use critic::{TwinCritic, TwinCriticConfig};
pub use mlp::{MLPConfig, MLP};
pub use soft_update::SoftUpdate;
