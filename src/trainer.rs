//! Episode loop that drives an agent against an environment

use std::path::{Path, PathBuf};

use burn::config::Config;
use tracing::info;

use crate::{
    env::Environment,
    logger::{EpisodeStats, TrainLogger},
    traits::{Checkpointable, TrainableAgent},
};

#[derive(Config, Debug)]
pub struct TrainerConfig {
    /// Upper bound on training episodes
    #[config(default = 1000)]
    pub episodes: usize,
    /// Episodes in the rolling score window
    #[config(default = 100)]
    pub score_window: usize,
    /// A progress line is logged every N episodes
    #[config(default = 10)]
    pub log_every: usize,
    /// Rolling mean above which training stops early
    ///
    /// Also enables progress checkpoints at every multiple of a fifth of it.
    #[config(default = "None")]
    pub solved_score: Option<f32>,
    /// Directory checkpoints are written to, created when missing
    #[config(default = "String::from(\"runs\")")]
    pub checkpoint_dir: String,
}

/// Outcome of [`Trainer::train`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_steps: usize,
    /// Rolling mean score after the last episode
    pub last_mean_score: f32,
    pub solved: bool,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train `agent` for up to `episodes` episodes
    ///
    /// Always leaves a `{run_name}_final_weights` checkpoint behind.
    pub fn train<A, E>(&self, agent: &mut A, env: &mut E) -> crate::Result<TrainingSummary>
    where
        A: TrainableAgent + Checkpointable,
        E: Environment,
    {
        let dir = Path::new(&self.config.checkpoint_dir);
        std::fs::create_dir_all(dir)?;

        agent.train();
        let run_name = agent.run_name();
        let mut logger = TrainLogger::new(self.config.score_window.max(1));
        let mut next_progress = 1;
        let mut mean_score = 0.0;
        let mut solved = false;

        info!(run = %run_name, episodes = self.config.episodes, "training started");

        for episode in 0..self.config.episodes {
            let rewards = run_episode(agent, env)?;
            mean_score = logger.record_episode(&rewards);

            if self.config.log_every > 0 && (episode + 1) % self.config.log_every == 0 {
                logger.log(&agent.stats());
            }

            if let Some(solved_score) = self.config.solved_score {
                if mean_score >= next_progress as f32 * 0.2 * solved_score {
                    agent.save(&progress_path(dir, &run_name, mean_score))?;
                    next_progress += 1;
                }
                if mean_score > solved_score {
                    info!(episodes = episode + 1, mean_score, "solved");
                    solved = true;
                    break;
                }
            }
        }

        agent.save(&final_path(dir, &run_name))?;

        Ok(TrainingSummary {
            episodes: logger.episodes(),
            total_steps: logger.total_steps(),
            last_mean_score: mean_score,
            solved,
        })
    }
}

/// Play one episode without exploration, storage or learning
///
/// The agent's previous mode is restored afterwards.
pub fn evaluate<A, E>(agent: &mut A, env: &mut E) -> crate::Result<EpisodeStats>
where
    A: TrainableAgent,
    E: Environment,
{
    let was_training = agent.is_training();
    agent.eval();
    let rewards = run_episode(agent, env);
    if was_training {
        agent.train();
    }
    Ok(EpisodeStats::from_rewards(&rewards?))
}

/// Checkpoint written each time the rolling mean reaches the next milestone
pub fn progress_path(dir: &Path, run_name: &str, score: f32) -> PathBuf {
    dir.join(format!("{run_name}_{score:.5}_weights"))
}

pub fn final_path(dir: &Path, run_name: &str) -> PathBuf {
    dir.join(format!("{run_name}_final_weights"))
}

fn run_episode<A, E>(agent: &mut A, env: &mut E) -> crate::Result<Vec<f32>>
where
    A: TrainableAgent + ?Sized,
    E: Environment + ?Sized,
{
    let mut state = env.reset();
    let mut rewards = Vec::new();
    loop {
        let action = agent.select_action(&state)?;
        let step = env.step(&action);
        agent.observe(&step.next_state, step.reward, step.terminal)?;
        rewards.push(step.reward);
        if step.terminal {
            return Ok(rewards);
        }
        state = step.next_state;
    }
}
