use rand::{seq::index, Rng};

use super::{Transition, TransitionBatch};
use crate::error::{Error, Result};

/// Fixed-capacity ring buffer of transitions
///
/// Slots are allocated once as the buffer fills; afterwards each push
/// overwrites the oldest transition in place.
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    slots: Vec<Transition>,
    capacity: usize,
    /// Slot the next push writes to, which is also the oldest entry once full
    cursor: usize,
}

impl ReplayMemory {
    /// Create an empty memory holding at most `capacity` transitions
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "replay memory capacity must be positive");
        Self {
            slots: Vec::new(),
            capacity,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a transition, evicting the oldest one when full
    pub fn push(&mut self, transition: Transition) {
        if self.slots.len() < self.capacity {
            self.slots.push(transition);
        } else {
            self.slots[self.cursor] = transition;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Iterate over stored transitions from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        let split = if self.slots.len() < self.capacity {
            0
        } else {
            self.cursor
        };
        self.slots[split..].iter().chain(self.slots[..split].iter())
    }

    /// Draw `batch_size` distinct transitions uniformly at random
    ///
    /// Every stored transition is equally likely regardless of its age. The
    /// order of the returned batch is unspecified.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Result<TransitionBatch> {
        // A full-size batch is allowed here; Td3Agent::learn waits for more than a batch
        if self.slots.len() < batch_size {
            return Err(Error::InsufficientData {
                available: self.slots.len(),
                requested: batch_size,
            });
        }

        let mut batch = TransitionBatch::with_capacity(batch_size);
        for i in index::sample(rng, self.slots.len(), batch_size) {
            batch.push(&self.slots[i]);
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn transition(id: f32) -> Transition {
        Transition {
            state: vec![id],
            action: vec![id * 10.0],
            next_state: vec![id + 1.0],
            reward: id,
            terminal: false,
        }
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let mut memory = ReplayMemory::new(5);
        for i in 0..23 {
            memory.push(transition(i as f32));
            assert!(memory.len() <= memory.capacity());
        }
        assert_eq!(memory.len(), 5);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut memory = ReplayMemory::new(3);
        for i in 1..=4 {
            memory.push(transition(i as f32));
        }

        let rewards: Vec<f32> = memory.iter().map(|t| t.reward).collect();
        assert_eq!(rewards, vec![2.0, 3.0, 4.0]);
        assert!(memory.iter().all(|t| t != &transition(1.0)));
    }

    #[test]
    fn iter_is_oldest_to_newest_after_many_wraps() {
        let mut memory = ReplayMemory::new(4);
        for i in 0..10 {
            memory.push(transition(i as f32));
        }

        let rewards: Vec<f32> = memory.iter().map(|t| t.reward).collect();
        assert_eq!(rewards, vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn sample_fails_without_enough_data() {
        let mut memory = ReplayMemory::new(10);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            memory.sample(1, &mut rng),
            Err(Error::InsufficientData { available: 0, requested: 1 })
        ));

        memory.push(transition(0.0));
        memory.push(transition(1.0));
        assert!(matches!(
            memory.sample(3, &mut rng),
            Err(Error::InsufficientData { available: 2, requested: 3 })
        ));
    }

    #[test]
    fn sample_of_full_size_returns_every_item() {
        let mut memory = ReplayMemory::new(10);
        memory.push(transition(1.0));
        memory.push(transition(2.0));

        let mut rng = StdRng::seed_from_u64(42);
        let batch = memory.sample(2, &mut rng).unwrap();

        let mut rewards = batch.rewards.clone();
        rewards.sort_by(f32::total_cmp);
        assert_eq!(rewards, vec![1.0, 2.0]);

        // Same seed, same batch
        let mut rng = StdRng::seed_from_u64(42);
        let again = memory.sample(2, &mut rng).unwrap();
        assert_eq!(batch.rewards, again.rewards);
    }

    #[test]
    fn sample_has_no_duplicates() {
        let mut memory = ReplayMemory::new(100);
        for i in 0..100 {
            memory.push(transition(i as f32));
        }

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let batch = memory.sample(64, &mut rng).unwrap();
            let mut rewards = batch.rewards.clone();
            rewards.sort_by(f32::total_cmp);
            rewards.dedup();
            assert_eq!(rewards.len(), 64);
        }
    }

    #[test]
    fn sample_keeps_columns_aligned() {
        let mut memory = ReplayMemory::new(16);
        for i in 0..16 {
            memory.push(transition(i as f32));
        }

        let mut rng = StdRng::seed_from_u64(9);
        let batch = memory.sample(8, &mut rng).unwrap();
        for i in 0..batch.len() {
            let id = batch.rewards[i];
            assert_eq!(batch.states[i], vec![id]);
            assert_eq!(batch.actions[i], vec![id * 10.0]);
            assert_eq!(batch.next_states[i], vec![id + 1.0]);
        }
    }

    #[test]
    fn old_and_new_transitions_are_sampled_alike() {
        let mut memory = ReplayMemory::new(10);
        for i in 0..10 {
            memory.push(transition(i as f32));
        }

        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 10];
        for _ in 0..5000 {
            let batch = memory.sample(1, &mut rng).unwrap();
            counts[batch.rewards[0] as usize] += 1;
        }

        // Expected 500 per slot
        for count in counts {
            assert!((350..650).contains(&count), "skewed sampling: {counts:?}");
        }
    }
}
