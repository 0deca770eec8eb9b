use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

use crate::env::{ActionSpace, Environment, Step};

const MAX_SPEED: f32 = 8.0;
const MAX_TORQUE: f32 = 2.0;
const DT: f32 = 0.05;
const G: f32 = 10.0;
const M: f32 = 1.0;
const L: f32 = 1.0;

/// Classic Pendulum environment with continuous action space
///
/// The goal is to keep the pendulum upright by applying torque.
/// The state is represented as [cos(θ), sin(θ), angular_velocity] to avoid
/// discontinuity issues with angle wrapping.
///
/// # Physics
/// - Mass: 1.0 kg
/// - Length: 1.0 m
/// - Gravity: 10.0 m/s²
/// - Time step: 0.05 s
/// - Max angular velocity: 8.0 rad/s
/// - Max torque: 2.0 N⋅m
///
/// # Reward
/// r = -θ² - 0.1⋅θ̇² - 0.001⋅u²
///
/// Where θ is the angle from vertical (0 = upright), θ̇ is angular velocity,
/// and u is the applied torque. Episodes end after `max_steps` steps.
#[derive(Debug, Clone)]
pub struct Pendulum {
    theta: f32,
    theta_dot: f32,
    steps: usize,
    max_steps: usize,
    rng: StdRng,
}

impl Pendulum {
    /// Create a new Pendulum environment
    ///
    /// # Arguments
    /// * `max_steps` - Maximum number of steps per episode (typically 200)
    pub fn new(max_steps: usize) -> Self {
        Self::from_rng(max_steps, StdRng::from_entropy())
    }

    /// Same as [`Pendulum::new`] with reproducible initial states
    pub fn with_seed(max_steps: usize, seed: u64) -> Self {
        Self::from_rng(max_steps, StdRng::seed_from_u64(seed))
    }

    fn from_rng(max_steps: usize, rng: StdRng) -> Self {
        Self {
            theta: 0.0,
            theta_dot: 0.0,
            steps: 0,
            max_steps,
            rng,
        }
    }

    fn get_state(&self) -> Vec<f32> {
        vec![self.theta.cos(), self.theta.sin(), self.theta_dot]
    }

    fn angle_normalize(x: f32) -> f32 {
        (x + PI).rem_euclid(2.0 * PI) - PI
    }
}

impl Environment for Pendulum {
    fn state_dim(&self) -> usize {
        3
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::symmetric(1, MAX_TORQUE)
    }

    fn reset(&mut self) -> Vec<f32> {
        self.theta = self.rng.gen_range(-PI..PI);
        self.theta_dot = self.rng.gen_range(-1.0..1.0);
        self.steps = 0;
        self.get_state()
    }

    fn step(&mut self, action: &[f32]) -> Step {
        let torque = action.first().copied().unwrap_or(0.0).clamp(-MAX_TORQUE, MAX_TORQUE);

        // Reward is computed on the state before integration
        let reward = -(Self::angle_normalize(self.theta).powi(2)
            + 0.1 * self.theta_dot.powi(2)
            + 0.001 * torque.powi(2));

        // Physics: θ̈ = (3g/2L)sin(θ) + (3/mL²)u
        let theta_acc = (3.0 * G / (2.0 * L)) * self.theta.sin() + (3.0 / (M * L * L)) * torque;

        self.theta_dot = (self.theta_dot + theta_acc * DT).clamp(-MAX_SPEED, MAX_SPEED);
        self.theta = Self::angle_normalize(self.theta + self.theta_dot * DT);
        self.steps += 1;

        Step {
            next_state: self.get_state(),
            reward,
            terminal: self.steps >= self.max_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendulum_physics() {
        let mut env = Pendulum::with_seed(200, 0);

        let state = env.reset();
        assert_eq!(state.len(), env.state_dim());
        assert!(state[0].abs() <= 1.0, "cos(θ) should be in [-1, 1]");
        assert!(state[1].abs() <= 1.0, "sin(θ) should be in [-1, 1]");
        assert!(state[2].abs() <= MAX_SPEED, "Angular velocity should be bounded");

        let step = env.step(&[0.0]);
        assert!(!step.terminal, "Should not be terminal after one step");

        // Out of range torques are clamped
        let high = env.step(&[100.0]);
        let low = env.step(&[-100.0]);
        assert!(high.reward.is_finite());
        assert!(low.reward.is_finite());
        assert!(high.next_state[2].abs() <= MAX_SPEED);
    }

    #[test]
    fn pendulum_reward() {
        let mut env = Pendulum::with_seed(200, 0);
        env.theta = 0.0; // Upright
        env.theta_dot = 0.0; // Stationary

        let upright = env.step(&[0.0]).reward;
        assert!(upright > -1.0, "Reward should be close to 0 when upright and stationary");

        env.theta = PI; // Downward
        env.theta_dot = 0.0;
        let down = env.step(&[0.0]).reward;
        assert!(down < upright, "Reward should be lower when pendulum is down");
    }

    #[test]
    fn pendulum_action_bounds() {
        let env = Pendulum::new(200);
        let space = env.action_space();

        assert_eq!(space.dim(), 1);
        assert_eq!(space.low(), &[-MAX_TORQUE]);
        assert_eq!(space.high(), &[MAX_TORQUE]);
    }

    #[test]
    fn pendulum_episode_length() {
        let mut env = Pendulum::with_seed(5, 1);
        env.reset();

        for i in 0..5 {
            let step = env.step(&[0.0]);
            assert_eq!(step.terminal, i == 4, "terminal flag at step {i}");
        }

        env.reset();
        assert!(!env.step(&[0.0]).terminal, "reset starts a fresh episode");
    }

    #[test]
    fn seeded_resets_are_reproducible() {
        let mut a = Pendulum::with_seed(200, 42);
        let mut b = Pendulum::with_seed(200, 42);
        assert_eq!(a.reset(), b.reset());
        assert_eq!(a.step(&[1.0]), b.step(&[1.0]));
    }

    #[test]
    fn angle_normalize_wraps_into_half_open_range() {
        for x in [-7.0, -PI, 0.0, 3.0, 10.0] {
            let y = Pendulum::angle_normalize(x);
            assert!((-PI..PI).contains(&y), "{x} -> {y}");
        }
    }
}
