use burn::{
    grad_clipping::GradientClippingConfig,
    module::AutodiffModule,
    nn::loss::{MseLoss, Reduction},
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{collections::HashMap, path::Path};
use tracing::{debug, info, trace};

use super::{
    checkpoint,
    config::Td3Config,
    target::{bellman_targets, gaussian, smoothing_noise},
};
use crate::{
    env::ActionSpace,
    error::{Error, Result},
    memory::{ReplayMemory, Transition},
    nn::{Actor, ActorConfig, SoftUpdate, TwinCritic, TwinCriticConfig},
    traits::{BoolToTensor, Checkpointable, ToTensor, TrainableAgent, TrainingMetrics},
};

type ActorOptimizer<B> = OptimizerAdaptor<Adam, Actor<B>, B>;
type CriticOptimizer<B> = OptimizerAdaptor<Adam, TwinCritic<B>, B>;

/// How many learning steps pass between two debug metric lines
const LOG_EVERY: usize = 1000;

/// Whether actions come from uniform exploration or from the policy
///
/// The agent moves from `Exploring` to `Learning` once, when its step counter
/// reaches `exploration_steps`, and never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Exploring,
    Learning,
}

/// TD3 agent for continuous action spaces
///
/// Owns the trainable actor and twin critic, their target copies (kept on the
/// inner, non-differentiable backend), both optimizers, the replay memory and
/// all host-side randomness.
pub struct Td3Agent<B: AutodiffBackend> {
    // Networks
    actor: Actor<B>,
    critic: TwinCritic<B>,
    target_actor: Actor<B::InnerBackend>,
    target_critic: TwinCritic<B::InnerBackend>,

    actor_optimizer: ActorOptimizer<B>,
    critic_optimizer: CriticOptimizer<B>,

    memory: ReplayMemory,
    action_space: ActionSpace,
    state_dim: usize,
    config: Td3Config,
    device: B::Device,
    rng: StdRng,

    // Training state
    steps: usize,
    updates: usize,
    training: bool,
    pending: Option<(Vec<f32>, Vec<f32>)>,
}

impl<B: AutodiffBackend> Td3Agent<B> {
    /// Create an agent for states of length `state_dim` acting in `action_space`
    pub fn new(
        state_dim: usize,
        action_space: ActionSpace,
        config: Td3Config,
        device: B::Device,
    ) -> Result<Self> {
        config.validate()?;
        if state_dim == 0 {
            return Err(Error::InvalidConfig("state_dim must be positive".into()));
        }

        let rng = match config.seed {
            Some(seed) => {
                B::seed(seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let actor = ActorConfig::new(state_dim, action_space.dim(), config.hidden_layers())
            .with_max_action(action_space.max_action())
            .init::<B>(&device);
        let critic = TwinCriticConfig::new(state_dim, action_space.dim(), config.hidden_layers())
            .init::<B>(&device);

        // Targets start as independent copies of the trainable parameters
        let target_actor = actor.valid();
        let target_critic = critic.valid();

        debug!(
            state_dim,
            action_dim = action_space.dim(),
            actor_params = actor.num_params(),
            critic_params = critic.num_params(),
            "created TD3 agent"
        );

        Ok(Self {
            actor_optimizer: optimizer(config.gradient_clip),
            critic_optimizer: optimizer(config.gradient_clip),
            actor,
            critic,
            target_actor,
            target_critic,
            memory: ReplayMemory::new(config.memory_capacity),
            action_space,
            state_dim,
            config,
            device,
            rng,
            steps: 0,
            updates: 0,
            training: true,
            pending: None,
        })
    }

    pub fn config(&self) -> &Td3Config {
        &self.config
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    pub fn phase(&self) -> Phase {
        if self.steps < self.config.exploration_steps {
            Phase::Exploring
        } else {
            Phase::Learning
        }
    }

    /// Get the current size of the replay buffer
    pub fn buffer_size(&self) -> usize {
        self.memory.len()
    }

    pub fn memory(&self) -> &ReplayMemory {
        &self.memory
    }

    pub fn actor(&self) -> &Actor<B> {
        &self.actor
    }

    pub fn critic(&self) -> &TwinCritic<B> {
        &self.critic
    }

    pub fn target_actor(&self) -> &Actor<B::InnerBackend> {
        &self.target_actor
    }

    pub fn target_critic(&self) -> &TwinCritic<B::InnerBackend> {
        &self.target_critic
    }

    /// Choose an action for `state`
    ///
    /// While training and exploring, the action is drawn uniformly from the
    /// action space. Afterwards it is the policy output plus Gaussian noise. In
    /// evaluation mode it is the bare policy output. The result is always
    /// clipped into the action space.
    pub fn select_action(&mut self, state: &[f32]) -> Result<Vec<f32>> {
        self.check_state(state, "state")?;

        let mut action = if self.training && self.phase() == Phase::Exploring {
            self.action_space.sample(&mut self.rng)
        } else {
            let mut action = self.policy_action(state);
            if self.training {
                let noise = gaussian(&mut self.rng, action.len(), self.config.exploration_noise);
                action.iter_mut().zip(noise).for_each(|(a, n)| *a += n);
            }
            action
        };
        self.action_space.clip(&mut action);

        self.pending = Some((state.to_vec(), action.clone()));
        Ok(action)
    }

    /// Record the outcome of the last selected action
    ///
    /// Stores the transition and, once past the exploration phase, runs one
    /// learning step. Every `policy_update_freq` steps the target networks are
    /// moved toward the trainable ones.
    pub fn observe(
        &mut self,
        next_state: &[f32],
        reward: f32,
        terminal: bool,
    ) -> Result<Option<TrainingMetrics>> {
        self.check_state(next_state, "next state")?;
        let (state, action) = self.pending.take().ok_or(Error::ObserveBeforeSelect)?;

        self.steps += 1;
        if !self.training {
            return Ok(None);
        }

        self.memory.push(Transition {
            state,
            action,
            next_state: next_state.to_vec(),
            reward,
            terminal,
        });

        if self.steps == self.config.exploration_steps {
            info!(steps = self.steps, "exploration finished, acting with the policy");
        }
        if self.steps <= self.config.exploration_steps {
            return Ok(None);
        }

        let metrics = self.learn()?;
        if self.steps % self.config.policy_update_freq == 0 {
            self.sync_targets(self.config.tau);
        }
        Ok(metrics)
    }

    /// One learning step on a batch sampled from the replay memory
    ///
    /// Both critics are always updated; the actor only when the step counter
    /// is a multiple of `policy_update_freq`. Returns `Ok(None)` without
    /// touching any parameter while the memory holds `batch_size` transitions
    /// or fewer.
    pub fn learn(&mut self) -> Result<Option<TrainingMetrics>> {
        let batch_size = self.config.batch_size;
        if self.memory.len() <= batch_size {
            let gap = Error::InsufficientData {
                available: self.memory.len(),
                requested: batch_size + 1,
            };
            trace!(%gap, "skipping learning step");
            return Ok(None);
        }

        let batch = self.memory.sample(batch_size, &mut self.rng)?;
        let n = batch.len();

        let states: Tensor<B, 2> = batch.states.to_tensor(&self.device);
        let actions: Tensor<B, 2> = batch.actions.to_tensor(&self.device);

        let target = self.critic_targets(
            batch.next_states,
            batch.rewards,
            batch.terminals,
        );

        // Critic update
        let (q1, q2) = self.critic.forward(states.clone(), actions);
        let q1_mean = scalar(q1.clone().mean());
        let q2_mean = scalar(q2.clone().mean());
        let mse = MseLoss::new();
        let critic_loss = mse.forward(q1, target.clone(), Reduction::Mean)
            + mse.forward(q2, target.clone(), Reduction::Mean);
        let critic_loss_value = self.finite(scalar(critic_loss.clone()), "critic loss")?;

        let grads = GradientsParams::from_grads(critic_loss.backward(), &self.critic);
        self.critic = self
            .critic_optimizer
            .step(self.config.critic_lr, self.critic.clone(), grads);

        // Delayed actor update, critics held fixed
        let policy_loss = if self.steps % self.config.policy_update_freq == 0 {
            let q = self.critic.q1(states.clone(), self.actor.forward(states));
            let actor_loss = q.mean().neg();
            let actor_loss_value = self.finite(scalar(actor_loss.clone()), "actor loss")?;

            let grads = GradientsParams::from_grads(actor_loss.backward(), &self.actor);
            self.actor = self
                .actor_optimizer
                .step(self.config.actor_lr, self.actor.clone(), grads);
            Some(actor_loss_value)
        } else {
            None
        };

        self.updates += 1;
        if self.updates % LOG_EVERY == 0 {
            debug!(
                step = self.steps,
                critic_loss = critic_loss_value,
                actor_loss = ?policy_loss,
                q1_mean,
                "learning step"
            );
        }

        let target_mean = scalar(target.mean());
        Ok(Some(TrainingMetrics {
            policy_loss,
            value_loss: critic_loss_value,
            n_updates: 1,
            extra: HashMap::from([
                ("q1_mean".to_string(), q1_mean),
                ("q2_mean".to_string(), q2_mean),
                ("target_mean".to_string(), target_mean),
                ("batch_size".to_string(), n as f32),
            ]),
        }))
    }

    /// Move every target parameter toward its trainable counterpart by `tau`
    pub fn sync_targets(&mut self, tau: f32) {
        self.target_actor = self.target_actor.clone().soft_update(&self.actor.valid(), tau);
        self.target_critic = self.target_critic.clone().soft_update(&self.critic.valid(), tau);
    }

    /// Copy the trainable parameters into the targets
    ///
    /// Loading a checkpoint does not do this on its own.
    pub fn hard_sync_targets(&mut self) {
        self.sync_targets(1.0);
    }

    /// Deterministic policy output for a single state, before clipping
    fn policy_action(&self, state: &[f32]) -> Vec<f32> {
        let input: Tensor<B::InnerBackend, 2> = vec![state.to_vec()].to_tensor(&self.device);
        let output = self.actor.valid().forward(input);
        output.into_data().iter::<f32>().collect()
    }

    /// Clipped double-Q targets with target policy smoothing, detached from
    /// the autodiff graph
    fn critic_targets(
        &mut self,
        next_states: Vec<Vec<f32>>,
        rewards: Vec<f32>,
        terminals: Vec<bool>,
    ) -> Tensor<B, 2> {
        let n = rewards.len();
        let next_states: Tensor<B::InnerBackend, 2> = next_states.to_tensor(&self.device);
        let rewards: Tensor<B::InnerBackend, 1> = rewards.to_tensor(&self.device);
        let terminals = BoolToTensor::<B::InnerBackend>::to_bool_tensor(terminals, &self.device);

        let next_actions = self.target_actor.forward(next_states.clone());
        let noise = smoothing_noise::<B::InnerBackend, _>(
            &mut self.rng,
            next_actions.dims(),
            self.config.target_policy_noise,
            self.config.target_noise_clip,
            &self.device,
        );
        let next_actions = self.action_space.clamp_tensor(next_actions + noise);

        let (target_q1, target_q2) = self.target_critic.forward(next_states, next_actions);
        let next_q = target_q1.min_pair(target_q2);

        let target = bellman_targets(
            rewards.reshape([n, 1]),
            next_q,
            terminals.reshape([n, 1]),
            self.config.discount,
        );
        Tensor::from_inner(target)
    }

    fn check_state(&self, state: &[f32], what: &'static str) -> Result<()> {
        if state.len() != self.state_dim {
            return Err(Error::DimensionMismatch {
                what,
                expected: self.state_dim,
                actual: state.len(),
            });
        }
        Ok(())
    }

    fn finite(&self, value: f32, what: &'static str) -> Result<f32> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NumericDivergence {
                what,
                step: self.steps,
            })
        }
    }

    fn reset_optimizers(&mut self) {
        self.actor_optimizer = optimizer(self.config.gradient_clip);
        self.critic_optimizer = optimizer(self.config.gradient_clip);
    }
}

fn optimizer<B, M>(gradient_clip: Option<f32>) -> OptimizerAdaptor<Adam, M, B>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    AdamConfig::new()
        .with_grad_clipping(gradient_clip.map(GradientClippingConfig::Value))
        .init()
}

fn scalar<B: Backend>(tensor: Tensor<B, 1>) -> f32 {
    tensor.into_scalar().elem::<f32>()
}

impl<B: AutodiffBackend> TrainableAgent for Td3Agent<B> {
    fn select_action(&mut self, state: &[f32]) -> Result<Vec<f32>> {
        Td3Agent::select_action(self, state)
    }

    fn observe(
        &mut self,
        next_state: &[f32],
        reward: f32,
        terminal: bool,
    ) -> Result<Option<TrainingMetrics>> {
        Td3Agent::observe(self, next_state, reward, terminal)
    }

    fn total_steps(&self) -> usize {
        self.steps
    }

    fn stats(&self) -> String {
        format!(
            "GS: {}; LR: a-{:.5}/c-{:.5}",
            self.steps, self.config.actor_lr, self.config.critic_lr
        )
    }

    fn eval(&mut self) {
        self.training = false;
    }

    fn train(&mut self) {
        self.training = true;
    }

    fn is_training(&self) -> bool {
        self.training
    }
}

impl<B: AutodiffBackend> Checkpointable for Td3Agent<B> {
    fn run_name(&self) -> String {
        checkpoint::run_name(&self.config)
    }

    /// Persist the trainable actor and critics
    ///
    /// Targets and optimizer state are not saved. Refuses to write parameters
    /// that are NaN or infinite.
    fn save(&self, path: &Path) -> Result<()> {
        if !(self.actor.is_finite() && self.critic.is_finite()) {
            return Err(Error::NumericDivergence {
                what: "parameter",
                step: self.steps,
            });
        }
        checkpoint::save(path, self.actor.clone(), self.critic.clone())
    }

    /// Restore the trainable actor and critics
    ///
    /// Targets keep their current values and both optimizers start afresh;
    /// call [`Td3Agent::hard_sync_targets`] to align the targets explicitly.
    fn load(&mut self, path: &Path) -> Result<()> {
        let (actor, critic) =
            checkpoint::load(path, self.actor.clone(), self.critic.clone(), &self.device)?;
        self.actor = actor;
        self.critic = critic;
        self.reset_optimizers();
        Ok(())
    }
}
