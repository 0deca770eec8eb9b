//! TD3 actor-critic agent for continuous control, built on burn
//!
//! The agent ([`algo::td3::Td3Agent`]) is driven step by step through
//! [`traits::TrainableAgent`]; [`trainer::Trainer`] wraps that in an episode
//! loop with rolling score logging and checkpoints.

pub mod algo;
pub mod env;
pub mod error;
pub mod gym;
pub mod logger;
pub mod memory;
pub mod nn;
pub mod trainer;
pub mod traits;

pub use error::{Error, Result};
