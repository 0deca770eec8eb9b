//! Rolling episode statistics for training runs

use std::{collections::VecDeque, time::Instant};

use tracing::info;

/// Score and length of a single episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeStats {
    /// Sum of rewards
    pub score: f32,
    pub steps: usize,
}

impl EpisodeStats {
    pub fn from_rewards(rewards: &[f32]) -> Self {
        Self {
            score: rewards.iter().sum(),
            steps: rewards.len(),
        }
    }
}

/// Tracks the scores of the last `k` episodes and overall throughput
#[derive(Debug, Clone)]
pub struct TrainLogger {
    window: VecDeque<f32>,
    k: usize,
    total_steps: usize,
    episodes: usize,
    started: Instant,
}

impl TrainLogger {
    /// # Panics
    /// If `k` is zero.
    pub fn new(k: usize) -> Self {
        assert!(k > 0, "score window must hold at least one episode");
        Self {
            window: VecDeque::with_capacity(k),
            k,
            total_steps: 0,
            episodes: 0,
            started: Instant::now(),
        }
    }

    /// Add a finished episode and return the mean score over the window
    pub fn record_episode(&mut self, rewards: &[f32]) -> f32 {
        let stats = EpisodeStats::from_rewards(rewards);
        if self.window.len() == self.k {
            self.window.pop_front();
        }
        self.window.push_back(stats.score);
        self.total_steps += stats.steps;
        self.episodes += 1;
        self.mean_score()
    }

    /// Mean of the last `k` episode scores, 0 before the first episode
    pub fn mean_score(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Environment steps per wall-clock second since the logger was created
    pub fn steps_per_sec(&self) -> f32 {
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.total_steps as f32 / elapsed
        } else {
            0.0
        }
    }

    /// Emit one progress line, `agent_stats` is appended verbatim
    pub fn log(&self, agent_stats: &str) {
        info!(
            episodes = self.episodes,
            steps = self.total_steps,
            minutes = self.started.elapsed().as_secs() / 60,
            window = self.window.len(),
            mean_score = self.mean_score(),
            steps_per_sec = self.steps_per_sec(),
            agent = agent_stats,
            "training progress"
        );
    }
}
