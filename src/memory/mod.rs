//! Experience replay

mod replay;

pub use replay::ReplayMemory;

/// A single environment interaction
///
/// Stored as-is in the replay memory and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Vec<f32>,
    pub action: Vec<f32>,
    pub next_state: Vec<f32>,
    pub reward: f32,
    pub terminal: bool,
}

/// A batch of transitions, split into columns for tensor conversion
#[derive(Debug, Clone, Default)]
pub struct TransitionBatch {
    pub states: Vec<Vec<f32>>,
    pub actions: Vec<Vec<f32>>,
    pub next_states: Vec<Vec<f32>>,
    pub rewards: Vec<f32>,
    pub terminals: Vec<bool>,
}

impl TransitionBatch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            actions: Vec::with_capacity(capacity),
            next_states: Vec::with_capacity(capacity),
            rewards: Vec::with_capacity(capacity),
            terminals: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, transition: &Transition) {
        self.states.push(transition.state.clone());
        self.actions.push(transition.action.clone());
        self.next_states.push(transition.next_state.clone());
        self.rewards.push(transition.reward);
        self.terminals.push(transition.terminal);
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}
